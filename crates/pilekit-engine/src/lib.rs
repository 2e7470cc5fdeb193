//! # PileKit Engine
//!
//! This crate is the stacking and ordering engine behind PileKit: it keeps
//! track of which objects are piled together, decides which object a pointer
//! or a dropped object resolves to, and derives every object's on-screen
//! rectangle and draw order from its place in a pile.
//!
//! ## Core Components
//!
//! - **Registry**: sole owner of every object, addressed by a stable id
//! - **Pile model**: below/above links between ids, depth and anchor queries,
//!   `join` and `detach`
//! - **Selection**: nearest-rectangle resolver with depth tie-breaking
//! - **Interaction**: press/drag/release state machine
//! - **Presentation**: per-frame draw list for the host's renderer
//! - **Scene**: bulk setup and pre-dealt piles
//!
//! ## Architecture
//!
//! ```text
//! Engine (context passed by the host)
//!   ├── ObjectStore (objects + pile links)
//!   ├── Resolver (tie tolerance from settings)
//!   ├── InteractionState (Idle | Holding)
//!   └── EngineConfig
//!
//! tick(input) ─▶ press ─▶ drag_to ─▶ release ─▶ draw_list ─▶ Renderer
//! ```
//!
//! Rendering, input polling and the window belong to the host. The engine
//! consumes pointer edges through [`InputSource`] and hands [`DrawItem`]s to a
//! [`Renderer`].
//!
//! ## Usage
//!
//! ```rust
//! use pilekit_engine::{PointerFrame, SceneBuilder};
//! use pilekit_core::Rect;
//!
//! let mut scene = SceneBuilder::default();
//! let a = scene.card(Rect::new(0.0, 0.0, 100.0, 150.0), None).unwrap();
//! let b = scene.card(Rect::new(120.0, 0.0, 100.0, 150.0), None).unwrap();
//! let mut engine = scene.build();
//!
//! engine.tick(&PointerFrame::press(50.0, 75.0));
//! engine.tick(&PointerFrame::release(180.0, 80.0));
//!
//! assert_eq!(engine.depth_of(a).unwrap(), 1);
//! assert_eq!(engine.top_of(b).unwrap(), a);
//! ```

pub mod engine;
pub mod error;
pub mod input;
pub mod interaction;
pub mod object;
pub mod pile;
pub mod presentation;
pub mod registry;
pub mod scene;
pub mod selection;

pub use engine::{Engine, Frame};
pub use error::{SceneError, SceneResult};
pub use input::{InputSource, PointerFrame};
pub use interaction::{InteractionEvent, InteractionState, RevertReason};
pub use object::{Capability, GameObject, Interactive, PileLink, Pileable, Placement, Visual};
pub use presentation::{draw_list, submit, DrawItem, Renderer, HELD_DEPTH};
pub use registry::ObjectStore;
pub use scene::{default_layout, ObjectKind, ObjectSpec, SceneBuilder, SceneDescription};
pub use selection::{Candidate, Filter, Region, Resolver};
