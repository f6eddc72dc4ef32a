pub mod classify;
pub mod config;
pub mod error;
pub mod extract;
pub mod git;
pub mod navigation;
pub mod render;
pub mod resolve;
pub mod sanitize;
pub mod session;
pub mod smartlog;

pub use classify::{commit_row_index, current_checkout, is_commit_row, is_current_checkout};
pub use config::Config;
pub use error::{PickError, Result};
pub use extract::{ExtractedFields, FieldName, FieldSpan, extract};
pub use git::{GitCheckout, GitLogSource, GitOutput, GitRunner};
pub use navigation::{NavEvent, Navigator, Transition};
pub use render::{Frame, Paint, PaintStyle, Renderer, Viewport};
pub use resolve::{Resolver, resolve};
pub use sanitize::sanitize;
pub use session::{CheckoutSink, InputEvent, LogSource, Outcome, Screen, Session};
pub use smartlog::{CommitRow, FileLogSource, Smartlog};
