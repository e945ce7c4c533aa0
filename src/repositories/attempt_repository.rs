use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, from_document, Document},
    options::{FindOptions, IndexOptions},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{Attempt, EnrichedAttempt},
};

#[async_trait]
pub trait AttemptRepository: Send + Sync {
    async fn create(&self, attempt: Attempt) -> AppResult<Attempt>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Attempt>>;
    /// Full attempt history for one (quiz, user) pair, ordered by attempt
    /// number. This is what the attempt gate reasons over.
    async fn find_by_user_and_quiz(
        &self,
        user_id: &str,
        quiz_id: &str,
    ) -> AppResult<Vec<Attempt>>;
    async fn count_user_attempts(&self, user_id: &str, quiz_id: &str) -> AppResult<usize>;
    async fn get_user_attempts(
        &self,
        user_id: &str,
        quiz_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Attempt>, i64)>;
    /// Every attempt joined with course and user metadata, for the admin
    /// analytics aggregation.
    async fn list_all_enriched(&self) -> AppResult<Vec<EnrichedAttempt>>;
}

pub struct MongoAttemptRepository {
    collection: Collection<Attempt>,
}

impl MongoAttemptRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("attempts");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for attempts collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        // the store, not the client, enforces the attempt-number invariant;
        // a duplicate number for the same (quiz, user) is rejected here
        let attempt_number_index = IndexModel::builder()
            .keys(doc! { "quiz_id": 1, "user_id": 1, "attempt_number": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("quiz_user_attempt_number_unique".to_string())
                    .build(),
            )
            .build();

        let user_quiz_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "quiz_id": 1 })
            .options(IndexOptions::builder().name("user_quiz".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(attempt_number_index).await?;
        self.collection.create_index(user_quiz_index).await?;

        log::info!("Successfully created indexes for attempts collection");
        Ok(())
    }
}

#[async_trait]
impl AttemptRepository for MongoAttemptRepository {
    async fn create(&self, attempt: Attempt) -> AppResult<Attempt> {
        self.collection.insert_one(&attempt).await?;
        Ok(attempt)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Attempt>> {
        let attempt = self.collection.find_one(doc! { "id": id }).await?;
        Ok(attempt)
    }

    async fn find_by_user_and_quiz(
        &self,
        user_id: &str,
        quiz_id: &str,
    ) -> AppResult<Vec<Attempt>> {
        let attempts = self
            .collection
            .find(doc! {
                "user_id": user_id,
                "quiz_id": quiz_id
            })
            .sort(doc! { "attempt_number": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(attempts)
    }

    async fn count_user_attempts(&self, user_id: &str, quiz_id: &str) -> AppResult<usize> {
        let count = self
            .collection
            .count_documents(doc! {
                "user_id": user_id,
                "quiz_id": quiz_id
            })
            .await?;
        Ok(count as usize)
    }

    async fn get_user_attempts(
        &self,
        user_id: &str,
        quiz_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Attempt>, i64)> {
        let filter = doc! { "user_id": user_id, "quiz_id": quiz_id };

        let total = self.collection.count_documents(filter.clone()).await?;

        let find_options = FindOptions::builder()
            .skip(Some(offset as u64))
            .limit(Some(limit))
            .sort(doc! { "attempt_number": 1 })
            .build();

        let attempts = self
            .collection
            .find(filter)
            .with_options(find_options)
            .await?
            .try_collect()
            .await?;

        Ok((attempts, total as i64))
    }

    async fn list_all_enriched(&self) -> AppResult<Vec<EnrichedAttempt>> {
        // the join with course/user reference data happens store-side;
        // consumers only ever see the flattened shape
        let pipeline = vec![
            doc! { "$lookup": {
                "from": "courses",
                "localField": "course_id",
                "foreignField": "id",
                "as": "course"
            }},
            doc! { "$unwind": "$course" },
            doc! { "$lookup": {
                "from": "users",
                "localField": "user_id",
                "foreignField": "id",
                "as": "user"
            }},
            doc! { "$unwind": "$user" },
            doc! { "$project": {
                "_id": 0,
                "id": 1,
                "quiz_id": 1,
                "course_id": 1,
                "user_id": 1,
                "attempt_number": 1,
                "score": 1,
                "passed": 1,
                "submitted_at": 1,
                "course_name": "$course.name",
                "course_active": "$course.active",
                "user_name": "$user.name",
                "user_email": "$user.email"
            }},
        ];

        let documents: Vec<Document> = self
            .collection
            .aggregate(pipeline)
            .await?
            .try_collect()
            .await?;

        documents
            .into_iter()
            .map(|document| Ok(from_document(document)?))
            .collect()
    }
}
