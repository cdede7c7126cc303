//! # Domain Models
//!
//! Value types shared by the generator, the live adapter and the CLI.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`DataPoint`] | One dated observation, monetary fields in INR |
//! | [`Series`] | Ordered points plus symbol, granularity and origin |
//! | [`SeriesOrigin`] | `live` or `simulated` |
//! | [`Granularity`] | daily / weekly / monthly / yearly buckets |
//! | [`IsoDate`] | `yyyy-MM-dd` calendar date with bucket stepping |
//! | [`Symbol`] | Trimmed, uppercased ticker from user input |

mod calendar;
mod granularity;
mod models;
mod symbol;

pub use calendar::IsoDate;
pub use granularity::Granularity;
pub use models::{DataPoint, Series, SeriesOrigin};
pub use symbol::Symbol;
