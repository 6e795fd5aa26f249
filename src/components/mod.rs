//! Reusable view pieces shared by the pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages render to complete HTML documents through [`layout::render_document`].
//! Protected pages wrap their body in [`layout::AppShell`], which carries the
//! navigation sidebar and the notice banner.

pub mod finish_panel;
pub mod layout;
