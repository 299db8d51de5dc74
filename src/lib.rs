//! # casement
//!
//! Dialog windows for terminal applications: modals, confirms, prompts,
//! toasts, offcanvas panels, and loading overlays on a retained,
//! slotmap-backed node tree.
//!
//! casement's dialogs are driven by a lifecycle observer rather than ad-hoc
//! callbacks: every component's root is watched through a mutation journal,
//! and `created` / `rendered` / `hidden` / `removed` phases surface as
//! [`event::DialogEvent`]s on a bubbling bus. Dialogs can be dragged by
//! their header, resized through a handle, localized, and fed remote content
//! through a pluggable [`request::Requester`].
//!
//! ## Core Systems
//!
//! - **[`dom`]** — Slotmap-backed node arena with a mutation journal
//! - **[`observe`]** — Element lifecycle observer, position and size watchers
//! - **[`event`]** — Input events, dialog phases, bubbling event bus
//! - **[`components`]** — Modal, alert, confirm, prompt, toast, message, offcanvas, loading
//! - **[`session`]** — The dialog session: timers, observers, input routing
//! - **[`drag`]** — Pointer dragging with release-time boundary checks
//! - **[`host`]** — Overlay host driving show/hide transitions
//! - **[`style`]** — Display, visibility, and the visibility classifier
//! - **[`geometry`]** — Offset, Size, Region, Spacing primitives

// Foundation
pub mod assets;
pub mod error;
pub mod geometry;
pub mod style;

// Core systems
pub mod dom;
pub mod observe;

// Interaction
pub mod drag;
pub mod event;
pub mod resize;

// Components and hosting
pub mod components;
pub mod host;

// Session
pub mod i18n;
pub mod request;
pub mod session;
pub mod util;

pub use components::{DialogHandle, DialogSize, Placement, Tone};
pub use error::{CasementError, Result};
pub use observe::{ElementObserver, LifecycleCallbacks, ObserveConfig, Phase};
pub use session::DialogSession;
