//! Category endpoints.

use serde_json::Value;

use crate::client::ApiClient;
use crate::envelope::Listing;
use crate::error::Error;
use crate::model::{Category, CategoryPayload};

impl ApiClient {
    /// The full category list; the category table paginates this
    /// client-side.
    pub async fn categories(&self) -> Result<Vec<Category>, Error> {
        let listing: Listing<Category> = self.get("category/getAll").await?.into_data()?;
        Ok(listing.items)
    }

    pub async fn category(&self, id: i64) -> Result<Category, Error> {
        self.get(&format!("category?id={id}")).await?.into_data()
    }

    pub async fn create_category(&self, category: &CategoryPayload) -> Result<(), Error> {
        self.post::<Value, _>("category", category)
            .await?
            .into_result()?;
        Ok(())
    }

    pub async fn update_category(&self, category: &CategoryPayload) -> Result<(), Error> {
        self.put::<Value, _>("category", category)
            .await?
            .into_result()?;
        Ok(())
    }

    pub async fn delete_category(&self, id: i64) -> Result<(), Error> {
        self.delete::<Value>(&format!("category?id={id}"))
            .await?
            .into_result()?;
        Ok(())
    }
}
