//! Renderer boundary.

use crate::types::ResultRow;

/// How a result-set notification relates to what is already displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
	/// Replace the displayed rows with the given set.
	Replace,
	/// Concatenate the given rows onto the displayed set.
	Append,
}

/// Receives display updates from the session controller.
///
/// Implementations render rows and messages however they like; the
/// controller guarantees the calls arrive on its single logical thread in
/// a consistent order (rows first, then any message, then load-more
/// availability).
pub trait RenderSink: Send {
	fn on_result_set(&mut self, rows: &[ResultRow], mode: RenderMode);
	fn on_message(&mut self, text: &str);
	/// `visible` controls whether a load-more control is shown at all,
	/// `enabled` whether it is clickable (false while a page is loading).
	fn on_load_more(&mut self, visible: bool, enabled: bool);
}
