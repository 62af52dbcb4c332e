//! Cloud execution context and read-only resource calls
//!
//! [`CloudContextResolver`] works out the region and instance identity from
//! ambient configuration. [`CloudGateway`] uses it to drive a [`CloudBackend`]
//! and turns every backend failure into a [`ProbeFailure`] payload.

pub mod aws;
pub mod backend;
pub mod context;
pub mod gateway;

pub use aws::AwsBackend;
pub use backend::{CallerIdentity, CloudBackend, ObjectBody, ObjectPage, ObjectSummary};
pub use context::{CloudContext, CloudContextResolver, InstanceIdentity};
pub use gateway::{
    AccountIdentity, BucketListing, Buckets, CloudGateway, DownloadFailure, IdentityReport,
    ObjectDownload, ObjectEntries, ObjectEntry, ObjectListing, ProbeFailure, Probed, TableListing, Tables,
    DEFAULT_CONTENT_TYPE,
};
