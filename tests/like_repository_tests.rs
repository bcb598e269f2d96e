mod helpers;

use helpers::fake_id;
use like_service::database::filter::Filter;
use like_service::database::table_names::{COMMENT_LIKE_TABLE_NAME, POST_LIKE_TABLE_NAME};
use like_service::entities::like::{CommentLike, PostLike, USER_FIELD};
use like_service::interfaces::repositories::like::LikesRepositoryInterface;
use serde_json::json;

test_with_db!(post_like_lifecycle, |db| {
    let likes = &db.likes;

    assert!(likes
        .create_post_like(PostLike::new("user-7", "post-42"))
        .await
        .unwrap());
    assert!(likes.is_post_liked("post-42", "user-7").await.unwrap());
    assert_eq!(likes.find_post_like_count("post-42").await.unwrap(), 1);

    assert!(likes.delete_post_like("post-42", "user-7").await.unwrap());
    assert_eq!(likes.find_post_like_count("post-42").await.unwrap(), 0);
});

test_with_db!(liking_twice_keeps_one_record, |db| {
    let likes = &db.likes;
    let post_id = fake_id("post");
    let user_id = fake_id("user");

    likes
        .create_post_like(PostLike::new(&user_id, &post_id))
        .await
        .unwrap();
    likes
        .create_post_like(PostLike::new(&user_id, &post_id))
        .await
        .unwrap();

    assert_eq!(likes.find_post_like_count(&post_id).await.unwrap(), 1);
    let stored: Vec<PostLike> = db.store.find_all(POST_LIKE_TABLE_NAME).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].user_id, user_id);
    assert_eq!(stored[0].post_id, post_id);
});

test_with_db!(unlike_removes_exactly_one_like, |db| {
    let likes = &db.likes;
    let post_id = fake_id("post");
    for user in ["u1", "u2", "u3"] {
        likes
            .create_post_like(PostLike::new(user, &post_id))
            .await
            .unwrap();
    }
    assert_eq!(likes.find_post_like_count(&post_id).await.unwrap(), 3);

    likes.delete_post_like(&post_id, "u2").await.unwrap();
    assert_eq!(likes.find_post_like_count(&post_id).await.unwrap(), 2);
    assert!(likes
        .is_post_liked(&post_id, "u2")
        .await
        .unwrap_err()
        .is_not_found());
    assert!(likes.is_post_liked(&post_id, "u1").await.unwrap());
});

test_with_db!(count_is_distinct_users_per_post, |db| {
    let likes = &db.likes;
    for (user, post) in [("u1", "p1"), ("u2", "p1"), ("u1", "p1"), ("u1", "p2")] {
        likes
            .create_post_like(PostLike::new(user, post))
            .await
            .unwrap();
    }

    assert_eq!(likes.find_post_like_count("p1").await.unwrap(), 2);
    assert_eq!(likes.find_post_like_count("p2").await.unwrap(), 1);
    assert_eq!(likes.find_post_like_count("p3").await.unwrap(), 0);
});

test_with_db!(unlike_without_like_succeeds, |db| {
    assert!(db.likes.delete_post_like("postX", "userY").await.unwrap());
    assert!(db
        .likes
        .delete_comment_like("commentX", "userY")
        .await
        .unwrap());
});

test_with_db!(is_liked_surfaces_not_found, |db| {
    let err = db
        .likes
        .is_post_liked("post-1", "user-1")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(!err.is_store());
});

test_with_db!(comment_likes_mirror_post_likes, |db| {
    let likes = &db.likes;

    likes
        .create_comment_like(CommentLike::new("user-7", "comment-3"))
        .await
        .unwrap();
    likes
        .create_comment_like(CommentLike::new("user-7", "comment-3"))
        .await
        .unwrap();
    likes
        .create_comment_like(CommentLike::new("user-8", "comment-3"))
        .await
        .unwrap();

    assert_eq!(likes.find_comment_like_count("comment-3").await.unwrap(), 2);
    assert!(likes.is_comment_liked("comment-3", "user-7").await.unwrap());

    likes
        .delete_comment_like("comment-3", "user-7")
        .await
        .unwrap();
    assert_eq!(likes.find_comment_like_count("comment-3").await.unwrap(), 1);
    assert!(likes
        .is_comment_liked("comment-3", "user-7")
        .await
        .unwrap_err()
        .is_not_found());

    // comment likes never show up as post likes
    assert_eq!(likes.find_post_like_count("comment-3").await.unwrap(), 0);
});

test_with_db!(user_likes_lists_post_ids_only, |db| {
    let likes = &db.likes;
    likes
        .create_post_like(PostLike::new("user-1", "post-a"))
        .await
        .unwrap();
    likes
        .create_post_like(PostLike::new("user-1", "post-b"))
        .await
        .unwrap();
    likes
        .create_post_like(PostLike::new("user-2", "post-c"))
        .await
        .unwrap();
    likes
        .create_comment_like(CommentLike::new("user-1", "comment-a"))
        .await
        .unwrap();

    let mut post_ids = likes.find_user_likes("user-1").await.unwrap();
    post_ids.sort();
    assert_eq!(post_ids, vec!["post-a".to_string(), "post-b".to_string()]);

    assert!(likes.find_user_likes("nobody").await.unwrap().is_empty());
});

test_with_db!(decode_error_is_not_an_empty_count, |db| {
    db.likes
        .create_post_like(PostLike::new("user-1", "post-1"))
        .await
        .unwrap();
    db.store
        .insert(
            POST_LIKE_TABLE_NAME,
            &json!({"postid": "post-1", "uid": {"broken": true}, "created": "2024-01-01T00:00:00Z"}),
        )
        .await
        .unwrap();

    let err = db.likes.find_post_like_count("post-1").await.unwrap_err();
    assert!(err.is_decode());
});

test_with_db!(like_records_use_stored_field_names, |db| {
    let like = CommentLike::new("user-5", "comment-9");
    db.likes.create_comment_like(like.clone()).await.unwrap();

    let stored: CommentLike = db
        .store
        .query_one(
            COMMENT_LIKE_TABLE_NAME,
            &Filter::field("commentid", "comment-9").and(USER_FIELD, "user-5"),
        )
        .await
        .unwrap();
    assert_eq!(stored.id, like.id);
    assert_eq!(stored.created_at, like.created_at);
});

test_with_db!(concurrent_likes_for_one_pair_keep_one_record, |db| {
    let post_id = fake_id("post");
    let user_id = fake_id("user");

    let handles = (0..32)
        .map(|_| {
            let likes = db.likes.clone();
            let like = PostLike::new(&user_id, &post_id);
            tokio::spawn(async move { likes.create_post_like(like).await })
        })
        .collect::<Vec<_>>();

    let mut liked = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            liked += 1;
        }
    }
    assert!(liked > 0);

    assert_eq!(db.likes.find_post_like_count(&post_id).await.unwrap(), 1);
    assert!(db.likes.delete_post_like(&post_id, &user_id).await.unwrap());
    assert_eq!(db.likes.find_post_like_count(&post_id).await.unwrap(), 0);
});

test_with_db!(second_record_for_same_pair_is_rejected, |db| {
    let like = PostLike::new("user-3", "post-3");
    db.store.insert(POST_LIKE_TABLE_NAME, &like).await.unwrap();

    let err = db
        .store
        .insert(POST_LIKE_TABLE_NAME, &PostLike::new("user-3", "post-3"))
        .await
        .unwrap_err();
    assert!(err.is_store());

    for _ in 0..2 {
        let _ = db
            .store
            .insert(COMMENT_LIKE_TABLE_NAME, &CommentLike::new("user-3", "comment-3"))
            .await;
    }
    assert_eq!(db.likes.find_comment_like_count("comment-3").await.unwrap(), 1);
});
