//! Task endpoints.

use std::fmt::Write as _;

use serde_json::Value;

use crate::client::ApiClient;
use crate::envelope::Paged;
use crate::error::Error;
use crate::model::{Task, TaskFilter, TaskOrderBy, TaskPayload};

impl ApiClient {
    /// One page of tasks. `page_number` is 1-based on the wire.
    pub async fn tasks_paged(
        &self,
        page_number: usize,
        page_size: usize,
        filter: Option<&TaskFilter>,
        ordering: Option<TaskOrderBy>,
    ) -> Result<Paged<Task>, Error> {
        let mut path = format!("Task/getPaged?pageNumber={page_number}&pageSize={page_size}");

        if let Some(filter) = filter {
            if let Some(category_id) = filter.category_id {
                let _ = write!(path, "&categoryId={category_id}");
            }
            if let Some(name) = &filter.name {
                let _ = write!(path, "&name={}", urlencoding::encode(name));
            }
            if let Some(status) = filter.status {
                let _ = write!(path, "&status={}", u8::from(status));
            }
            if let Some(priority) = filter.priority {
                let _ = write!(path, "&priority={}", u8::from(priority));
            }
        }
        if let Some(ordering) = ordering {
            let _ = write!(path, "&ordering={}", ordering.code());
        }

        self.get(&path).await?.into_data()
    }

    pub async fn task(&self, id: i64) -> Result<Task, Error> {
        self.get(&format!("Task?id={id}")).await?.into_data()
    }

    pub async fn create_task(&self, task: &TaskPayload) -> Result<(), Error> {
        self.post::<Value, _>("Task", task).await?.into_result()?;
        Ok(())
    }

    pub async fn update_task(&self, task: &TaskPayload) -> Result<(), Error> {
        self.put::<Value, _>("Task", task).await?.into_result()?;
        Ok(())
    }

    pub async fn delete_task(&self, id: i64) -> Result<(), Error> {
        self.delete::<Value>(&format!("Task?id={id}"))
            .await?
            .into_result()?;
        Ok(())
    }
}
