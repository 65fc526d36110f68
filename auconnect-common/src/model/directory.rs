use crate::model::Id;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct FacultyMarker;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct DepartmentMarker;

#[derive(Clone, Eq, PartialEq, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    pub id: Id<FacultyMarker>,
    pub name: String,
    pub designation: String,
    pub department: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Relative on the wire; resolve before display.
    #[serde(default)]
    pub photo_url: Option<String>,
}

#[derive(Clone, Eq, PartialEq, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: Id<DepartmentMarker>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}
