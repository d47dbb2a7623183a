pub mod passbook;
