// src/models/facet.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The independent classification dimensions a question is tagged with.
/// `Year` is virtual: its values are the distinct exam years in the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetDimension {
    Subject,
    Topic,
    Board,
    Agency,
    EducationLevel,
    Year,
}

impl FacetDimension {
    /// Table backing this dimension, `None` for the virtual year dimension.
    pub fn table(self) -> Option<&'static str> {
        match self {
            FacetDimension::Subject => Some("subjects"),
            FacetDimension::Topic => Some("topics"),
            FacetDimension::Board => Some("boards"),
            FacetDimension::Agency => Some("agencies"),
            FacetDimension::EducationLevel => Some("education_levels"),
            FacetDimension::Year => None,
        }
    }
}

/// One selectable value of a facet dimension.
/// Topics carry the owning subject in `parent_id`; everything else is flat.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct FacetValue {
    pub id: i64,
    pub label: String,
    pub parent_id: Option<i64>,
}

/// Query params for the catalog listing (narrows topics to one subject).
#[derive(Debug, Default, Deserialize)]
pub struct FacetListParams {
    pub subject_id: Option<i64>,
}
