//! `travelform` - customer travel data entry
//!
//! This library holds the form state, the submission pipeline that sends a
//! customer record to the travel spreadsheet endpoint, and the local mirror
//! of every record submitted from this machine.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod form;
pub mod logging;
pub mod mirror;
pub mod notice;
pub mod payload;
pub mod photo;
pub mod record;
pub mod render;
pub mod storage;
pub mod submission;

pub use config::Config;
pub use endpoint::{Endpoint, HttpEndpoint};
pub use error::{Error, Result};
pub use form::Form;
pub use logging::init_logging;
pub use mirror::{LocalRecordStore, MemoryRecordStore, RecordMirror, RecordStore};
pub use notice::{Notice, NoticeBoard, NoticeKind};
pub use payload::{build_payload, EndpointResponse, Payload};
pub use photo::PhotoAttachment;
pub use record::{Draft, Field, Gender, StoredRecord};
pub use storage::{Storage, StorageStats};
pub use submission::{SubmitState, Submitter};
