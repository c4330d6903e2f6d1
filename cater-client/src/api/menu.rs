//! Scheduled menu API
//!
//! Edits here are unguarded; caterer flows go through
//! [`CatererActions`](crate::CatererActions), which checks for existing
//! orders first.

use crate::{ClientError, ClientResult, HttpClient};
use chrono::NaiveDate;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use shared::models::{ScheduledMenu, ScheduledMenuCreate, ScheduledMenuUpdate};
use std::path::Path;

/// Response of a flyer upload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlyerUpload {
    #[serde(alias = "flyer_url", alias = "file_url")]
    pub url: String,
}

impl HttpClient {
    pub async fn menus(&self) -> ClientResult<Vec<ScheduledMenu>> {
        self.get("menu/scheduled").await
    }

    pub async fn menu(&self, id: i64) -> ClientResult<ScheduledMenu> {
        self.get(&format!("menu/scheduled/{id}")).await
    }

    /// Active menus published for `date`
    pub async fn menus_for_date(&self, date: NaiveDate) -> ClientResult<Vec<ScheduledMenu>> {
        let menus: Vec<ScheduledMenu> = self
            .get_query("menu/scheduled", &[("menu_date", date.to_string())])
            .await?;
        Ok(menus
            .into_iter()
            .filter(|m| m.date == date && m.is_active)
            .collect())
    }

    pub async fn create_menu(&self, menu: &ScheduledMenuCreate) -> ClientResult<ScheduledMenu> {
        self.post("menu/scheduled", menu).await
    }

    pub async fn update_menu(&self, id: i64, update: &ScheduledMenuUpdate) -> ClientResult<ScheduledMenu> {
        self.put(&format!("menu/scheduled/{id}"), update).await
    }

    pub async fn delete_menu(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("menu/scheduled/{id}")).await
    }

    /// Upload a flyer image for a menu
    pub async fn upload_flyer(
        &self,
        menu_id: i64,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ClientResult<FlyerUpload> {
        let mime = flyer_mime(file_name).ok_or_else(|| {
            ClientError::Validation(format!("Unsupported flyer file type: {file_name}"))
        })?;
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)?;
        let form = Form::new().part("file", part);
        self.post_multipart(&format!("menu/scheduled/{menu_id}/flyer"), form)
            .await
    }

    pub async fn upload_flyer_file(&self, menu_id: i64, path: &Path) -> ClientResult<FlyerUpload> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ClientError::Validation(format!("Invalid flyer path: {}", path.display())))?
            .to_string();
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            ClientError::Validation(format!("Cannot read flyer {}: {e}", path.display()))
        })?;
        self.upload_flyer(menu_id, &file_name, bytes).await
    }
}

fn flyer_mime(file_name: &str) -> Option<&'static str> {
    let ext = Path::new(file_name).extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "pdf" => Some("application/pdf"),
        _ => None,
    }
}
