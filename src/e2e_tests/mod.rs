//! Runs against a live task store.
//!
//! `TASKBOARD_API_URL` points at the store (default
//! `http://localhost:3000/api/`), `TASKBOARD_USER` picks the user the test
//! tasks are created for.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use rand::distributions::Alphanumeric;
    use rand::{thread_rng, Rng};
    use url::Url;

    use crate::config::DEFAULT_API_URL;
    use crate::model::{TaskDraft, TaskStatus, UserId};
    use crate::remote::{HttpTaskApi, TaskApi};
    use crate::store::TaskListStore;

    fn api() -> Arc<HttpTaskApi> {
        let url = std::env::var("TASKBOARD_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        Arc::new(HttpTaskApi::new(Url::parse(&url).unwrap()))
    }

    fn user() -> UserId {
        UserId::from(std::env::var("TASKBOARD_USER").unwrap_or_else(|_| "e2e-user".into()))
    }

    fn random_title() -> String {
        let suffix: String = thread_rng()
            .sample_iter(&Alphanumeric)
            .take(12)
            .map(char::from)
            .collect();
        format!("e2e {}", suffix)
    }

    #[tokio::test]
    async fn test_e2e_task_lifecycle() {
        let api = api();
        let mut store = TaskListStore::new(api.clone());
        store.list(&user()).await.unwrap();
        let before = store.tasks().len();

        let title = random_title();
        let draft = TaskDraft::new(title.clone()).with_date(NaiveDate::from_ymd_opt(2031, 1, 1));
        let created = store.create(&draft, &user()).await.unwrap();
        assert_eq!(store.tasks().len(), before + 1);

        let updated = api
            .update(
                &created.id,
                &created.draft().with_status(TaskStatus::Completed),
            )
            .await
            .unwrap();
        store.update(updated).unwrap();

        store.list(&user()).await.unwrap();
        let stored = store.get(&created.id).unwrap();
        assert_eq!(stored.title, title);
        assert_eq!(stored.status, TaskStatus::Completed);

        store.delete(&created.id).await.unwrap();
        store.list(&user()).await.unwrap();
        assert!(store.get(&created.id).is_none());
        assert_eq!(store.tasks().len(), before);
    }

    #[tokio::test]
    async fn test_e2e_concurrent_edits_last_write_wins() {
        let api = api();
        let created = api
            .create(&TaskDraft::new(random_title()), &user())
            .await
            .unwrap();

        let titles: Vec<String> = (0..3).map(|_| random_title()).collect();
        let edits = titles.iter().map(|title| {
            let api = api.clone();
            let draft = created.draft().with_description(title.clone());
            let id = created.id.clone();
            tokio::spawn(async move { api.update(&id, &draft).await })
        });
        for res in futures::future::join_all(edits).await {
            res.unwrap().unwrap();
        }

        let mut store = TaskListStore::new(api.clone());
        store.list(&user()).await.unwrap();
        let stored = store.get(&created.id).unwrap();
        assert!(
            titles.contains(&stored.description),
            "one of the concurrent edits won"
        );

        store.delete(&created.id).await.unwrap();
    }
}
