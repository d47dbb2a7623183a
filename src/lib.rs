//! Core library for the passbook-tools command line application.
//!
//! Converts a cooperative member passbook worksheet into a normalised
//! statement. IO adapters live under [`koperasi::passbook::io`], the table
//! and record types inside [`koperasi::passbook::model`], the layout
//! inference under [`koperasi::passbook::extract`], and the end-to-end
//! conversions in [`koperasi::passbook::convert`].

pub mod koperasi;

pub use koperasi::passbook::{
    PassbookError, Result, clean, convert, dates, error, extract, io, layout, model,
};
