//! Tool infrastructure — catalog, registry, dispatch and the handlers behind
//! each tool (HTTP executor, file store).

pub mod catalog;
pub mod dispatch;
pub mod files;
pub mod http;
pub mod registry;

pub use catalog::{ParamDef, ParamType, ToolEntry};
pub use dispatch::ToolDispatcher;
pub use files::FileStore;
pub use http::{HttpExecutor, HttpMethod, HttpOutcome, HttpRequest, ReqwestExecutor};
pub use registry::{
    ToolKind, ToolRegistry, ValidatedRequest, TOOL_GET_FILE, TOOL_LIST_FILES, TOOL_REQUEST,
    TOOL_SAVE_FILE,
};
