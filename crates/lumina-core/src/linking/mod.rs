//! Entity linking of catalog product names inside free text.
//!
//! Assistant replies are split into plain text and product references so the
//! front-end can render each mention as a "view product" trigger that resolves
//! by product id.

mod segment;

pub use segment::{Segment, join_segments, linked_product_ids, segment, segment_products};
