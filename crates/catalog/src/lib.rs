//! Museum catalogue entity model.
//!
//! Pure domain types (no IO, no storage): items as a closed tagged union,
//! the category tree nodes, artists and display locations.

pub mod artist;
pub mod category;
pub mod item;
pub mod location;
pub mod record;
pub mod status;

pub use artist::Artist;
pub use category::Category;
pub use item::{
    ArtifactDetails, Exhibit, ExhibitVariant, Item, ItemKind, ItemType, PaintingDetails,
    SculptureDetails,
};
pub use location::Location;
pub use record::ItemRecord;
pub use status::ItemStatus;
