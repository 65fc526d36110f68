use crate::client::{ApiClient, Result};
use auconnect_common::model::directory::{Department, Faculty};

impl ApiClient {
    pub async fn faculty(&self) -> Result<Vec<Faculty>> {
        self.get_json("/api/faculty").await
    }

    pub async fn faculty_by_department(&self, department: &str) -> Result<Vec<Faculty>> {
        self.get_json(&format!("/api/faculty/department/{department}"))
            .await
    }

    pub async fn departments(&self) -> Result<Vec<Department>> {
        self.get_json("/api/departments").await
    }
}
