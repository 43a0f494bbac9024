//! A headless infinite carousel engine.
//!
//! Given `N` ordered items, the carousel keeps a continuous horizontal track position driven by
//! drag gestures, makes the track appear to loop forever in both directions, and settles on a
//! centered card using velocity-aware snapping.
//!
//! The items are laid out three times back to back (the *working set*, `[0, 3N)`). Whenever the
//! centered index drifts out of the middle band the position is rewritten by exactly one set
//! width (a *fold*), which never changes the centered item.
//!
//! It is UI-agnostic. A GUI/web layer is expected to provide:
//! - the viewport width (on first measurement and on every resize)
//! - drag start/move/end events with pixel deltas and a release velocity
//! - animation frames while settling (see `carousel-adapter` for a spring-driven controller)
//!
//! and to render each card from its [`RenderDescriptor`].
#![forbid(unsafe_code)]

extern crate alloc;

#[macro_use]
mod macros;

mod carousel;
mod error;
mod fold;
mod layout;
mod options;
mod projection;
mod snap;
mod state;
mod types;
mod working_set;


pub use carousel::{Carousel, DragSession, ObserverId};
pub use error::ConfigError;
pub use fold::{Fold, fold_band, fold_left, fold_position, fold_right};
pub use layout::{Layout, LayoutConfig, compute_layout};
pub use options::{
    CarouselOptions, MIN_DAMPING_RATIO, OnChangeCallback, SettleConfig, SpringConfig,
};
pub use projection::{ProjectionConfig, distance_from_center, project};
pub use snap::{SnapConfig, clamp_index, resolve_snap, snap_target_for_index};
pub use state::CarouselSnapshot;
pub use types::{
    FlickRounding, FoldDirection, FoldPolicy, InputKind, Item, ItemKey, Phase, RenderDescriptor,
    SnapTarget, WorkingKey,
};
pub use working_set::{
    REPLICAS, WorkingSet, home_range, original_index, replica_of, working_len,
};
