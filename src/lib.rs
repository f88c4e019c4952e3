pub mod catalog;
pub mod commit;
pub mod error;
pub mod hosting;
pub mod links;
pub mod model;
pub mod naming;
pub mod remote;
pub mod session;
pub mod store;

pub use crate::catalog::{CatalogOptions, ManifestSnapshot, build_catalog, fetch_manifest};
pub use crate::commit::{CommitBuilder, OperationState, UploadRoute, route_for};
pub use crate::error::{FileDockError, Result};
pub use crate::hosting::{HostCall, HostingApi, MemoryHost};
pub use crate::links::download_url;
pub use crate::remote::RemoteClient;
pub use crate::session::Session;
