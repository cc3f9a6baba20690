//! Workspace membership and manifests
//!
//! - **lister**: who is in the workspace and where (`yarn workspaces list`)
//! - **manifest**: what each member declares in its package.json

pub mod lister;
pub mod manifest;

pub use lister::{WorkspaceEntry, WorkspaceLister, YarnLister};
pub use manifest::{FsManifestReader, ManifestReader, PackageManifest};
