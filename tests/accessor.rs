#[cfg(test)]
mod tests {
    use quarry::{Accessor, Generator, RowsAffected, Value};
    use quarry_tests::{Post, RecordingProvider, Response, User, init_logs, labeled};
    use time::macros::datetime;

    const USER_COLUMNS: [&str; 5] = ["id", "name", "email", "active", "score"];

    fn users() -> Accessor<User> {
        let decl = User::decl();
        Accessor::new(
            Generator::default()
                .generate_entity(&decl.name, decl.table.as_deref(), decl.fields)
                .unwrap(),
        )
    }

    fn ada() -> User {
        User {
            id: 1,
            name: "Ada".into(),
            email: Some("ada@example.com".into()),
            active: true,
            score: 99.5,
        }
    }

    #[tokio::test]
    async fn create_and_drop_table() {
        init_logs();
        let provider = RecordingProvider::new();
        let accessor = users();
        assert!(!accessor.create_table(&provider).await.unwrap());
        let recorded = provider.recorded().await;
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].sql, accessor.unit().create_table);
        assert!(recorded[0].params.is_empty());

        provider.add_table("user").await;
        assert!(accessor.create_table(&provider).await.unwrap());
        assert_eq!(provider.recorded().await.len(), 1);

        accessor.drop_table(&provider).await.unwrap();
        assert_eq!(
            provider.last().await.map(|v| v.sql),
            Some("DROP TABLE IF EXISTS `user`".to_string())
        );
        assert_eq!(provider.acquired(), 3);
        assert_eq!(provider.released(), 3);
    }

    #[tokio::test]
    async fn insert_and_update() {
        let provider = RecordingProvider::new();
        let accessor = users();
        let user = ada();
        provider.respond(Response::Affected(1)).await;
        let result = accessor.insert(&provider, &user).await.unwrap();
        assert_eq!(result, RowsAffected::new(1));
        let last = provider.last().await.unwrap();
        assert_eq!(last.sql, accessor.unit().insert.sql);
        assert_eq!(
            last.params,
            [
                Value::Varchar(Some("Ada".into())),
                Value::Varchar(Some("ada@example.com".into())),
                Value::Boolean(Some(true)),
                Value::Float64(Some(99.5)),
            ]
        );

        provider.respond(Response::Affected(1)).await;
        accessor.update(&provider, &user).await.unwrap();
        let last = provider.last().await.unwrap();
        assert_eq!(last.params.len(), 6);
        assert_eq!(last.params.first(), Some(&Value::Int32(Some(1))));
        assert_eq!(last.params.last(), Some(&Value::Int32(Some(1))));
        assert_eq!(provider.acquired(), provider.released());
    }

    #[tokio::test]
    async fn find() {
        let provider = RecordingProvider::new();
        let accessor = users();
        provider
            .respond(Response::Rows(vec![labeled(
                &USER_COLUMNS,
                [
                    Value::Int64(Some(1)),
                    Value::Varchar(Some("Ada".into())),
                    Value::Varchar(Some("ada@example.com".into())),
                    Value::Int8(Some(1)),
                    Value::Float32(Some(99.5)),
                ],
            )]))
            .await;
        let user = accessor.find_by_key(&provider, 1i64).await.unwrap();
        assert_eq!(user, Some(ada()));
        let last = provider.last().await.unwrap();
        assert_eq!(last.sql, accessor.unit().select_by_key.sql);
        // Key coerced to the primary key type
        assert_eq!(last.params, [Value::Int32(Some(1))]);

        let user = accessor.find_by_key(&provider, 2).await.unwrap();
        assert_eq!(user, None);

        assert!(accessor.find_by_key(&provider, "not a key").await.is_err());
        assert_eq!(provider.acquired(), provider.released());
    }

    #[tokio::test]
    async fn refresh() {
        let provider = RecordingProvider::new();
        let accessor = users();
        let mut stale = ada();
        stale.score = 0.0;
        provider
            .respond(Response::Rows(vec![labeled(
                &USER_COLUMNS,
                [
                    Value::Int32(Some(1)),
                    Value::Varchar(Some("Ada".into())),
                    Value::Varchar(Some("ada@example.com".into())),
                    Value::Boolean(Some(true)),
                    Value::Float64(Some(99.5)),
                ],
            )]))
            .await;
        let fresh = accessor.refresh(&provider, &stale).await.unwrap();
        assert_eq!(fresh, Some(ada()));
        let last = provider.last().await.unwrap();
        assert_eq!(last.sql, accessor.unit().select_self.sql);
        assert_eq!(last.params, [Value::Int32(Some(1))]);
    }

    #[tokio::test]
    async fn find_all() {
        let provider = RecordingProvider::new();
        let accessor = users();
        let row = |id: i32, name: &str| {
            labeled(
                &USER_COLUMNS,
                [
                    Value::Int32(Some(id)),
                    Value::Varchar(Some(name.into())),
                    Value::Varchar(None),
                    Value::Boolean(Some(false)),
                    Value::Float64(Some(0.0)),
                ],
            )
        };
        provider
            .respond(Response::Rows(vec![row(1, "a"), row(2, "b"), row(3, "c")]))
            .await;
        let all = accessor.find_all(&provider).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(
            all.iter().map(|u| u.name.as_str()).collect::<Vec<_>>(),
            ["a", "b", "c"]
        );
        assert!(all.iter().all(|u| u.email.is_none()));
        assert!(provider.last().await.unwrap().params.is_empty());

        assert!(accessor.find_all(&provider).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete() {
        let provider = RecordingProvider::new();
        let accessor = users();
        provider.respond(Response::Affected(1)).await;
        let deleted = accessor
            .delete_by_key(&provider, 1, |v| v.rows_affected)
            .await
            .unwrap();
        assert_eq!(deleted, 1);
        let last = provider.last().await.unwrap();
        assert_eq!(last.sql, "DELETE FROM `user` WHERE `id` = ?");
        assert_eq!(last.params, [Value::Int32(Some(1))]);

        // Zero rows is not an error
        let nothing = accessor
            .delete(&provider, &ada(), |v| v.is_empty())
            .await
            .unwrap();
        assert!(nothing);
        assert_eq!(
            provider.last().await.unwrap().params,
            [Value::Int32(Some(1))]
        );
        assert_eq!(provider.acquired(), 2);
        assert_eq!(provider.released(), 2);
    }

    #[tokio::test]
    async fn errors_propagate_and_release() {
        let provider = RecordingProvider::new();
        let accessor = users();
        provider
            .respond(Response::Fail("Duplicate entry".into()))
            .await;
        let error = accessor.insert(&provider, &ada()).await.unwrap_err();
        assert!(format!("{:#}", error).contains("Duplicate entry"));
        assert_eq!(provider.acquired(), 1);
        assert_eq!(provider.released(), 1);

        provider.respond(Response::Fail("Lost connection".into())).await;
        assert!(accessor.find_by_key(&provider, 1).await.is_err());
        assert_eq!(provider.released(), 2);

        // A row that cannot be decoded
        provider
            .respond(Response::Rows(vec![labeled(&["id"], [Value::Int32(Some(1))])]))
            .await;
        assert!(accessor.find_by_key(&provider, 1).await.is_err());
        assert_eq!(provider.released(), 3);
        assert_eq!(provider.pending().await, 0);

        provider.fail_acquire(true).await;
        assert!(accessor.find_all(&provider).await.is_err());
        assert_eq!(provider.acquired(), 3);
        assert_eq!(provider.released(), 3);
    }

    #[tokio::test]
    async fn foreign_key_entity() {
        let provider = RecordingProvider::new();
        let decl = Post::decl();
        let posts: Accessor<Post> = Accessor::new(
            Generator::default()
                .generate_entity(&decl.name, decl.table.as_deref(), decl.fields)
                .unwrap(),
        );
        provider
            .respond(Response::Rows(vec![labeled(
                &["id", "user_id", "title", "body", "created_at"],
                [
                    Value::Int64(Some(10)),
                    Value::Int32(Some(1)),
                    Value::Varchar(Some("Hello".into())),
                    Value::Varchar(None),
                    Value::Varchar(Some("2025-03-04 05:06:07".into())),
                ],
            )]))
            .await;
        let post = posts.find_by_key(&provider, 10).await.unwrap().unwrap();
        assert_eq!(post.id, 10);
        assert_eq!(post.user_id, 1);
        assert_eq!(post.body, None);
        assert_eq!(post.created_at, datetime!(2025-03-04 05:06:07));
        assert_eq!(
            provider.last().await.unwrap().params,
            [Value::Int64(Some(10))]
        );
    }
}
