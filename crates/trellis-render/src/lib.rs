//! Retained rendering layer for Trellis.
//!
//! This crate stands between widgets and whatever actually paints pixels. It
//! provides:
//!
//! - Geometry and color types ([`Point`], [`Size`], [`Rect`], [`Color`], [`Stroke`])
//! - A retained tree of primitives ([`Scene`]) with bounding boxes, hit testing
//!   and a flattened [`DrawCommand`] list
//! - A cloneable, thread-safe handle to a scene ([`Surface`])
//!
//! # Example
//!
//! ```
//! use trellis_render::{Color, Point, Surface};
//!
//! let surface = Surface::new();
//! let group = surface.group(surface.root())?;
//! let rect = surface.rect(group, 80.0, 30.0)?;
//! surface.set_fill(rect, Color::RED);
//! surface.set_interactive(rect, true);
//! surface.move_to(group, Point::new(100.0, 40.0));
//!
//! assert_eq!(surface.hit_test(Point::new(120.0, 50.0)), Some(rect));
//! # Ok::<(), trellis_render::RenderError>(())
//! ```

mod error;
mod scene;
mod surface;
mod types;

pub use error::{RenderError, RenderResult};
pub use scene::{
    ApproximateTextMeasure, DrawCommand, Primitive, PrimitiveId, Scene, Shape, TextMeasure,
};
pub use surface::Surface;
pub use types::{Color, Point, Rect, Size, Stroke};
