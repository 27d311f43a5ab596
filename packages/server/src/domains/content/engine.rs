//! Pure transition functions for the content aggregate.
//!
//! Every social interaction is expressed as a function that mutates a loaded
//! [`ContentItem`] in memory; persistence happens afterwards through
//! `ContentItem::save`. Keeping the transitions free of IO lets them be
//! tested exhaustively and reused identically for posts and courses.
//!
//! The like and dislike counter columns are never written anywhere else:
//! after each transition they are reassigned from set cardinality, so they
//! cannot go negative and cannot drift from the sets they summarize.

use chrono::Utc;

use crate::common::{AttachmentId, CommentId, Error, ReplyId, Result, UserId};
use crate::domains::content::models::{Attachment, Comment, ContentItem, ContentKind, Reply};

/// The two reaction flavors. Each user holds at most one of them per item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionKind {
    Like,
    Dislike,
}

impl std::fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReactionKind::Like => write!(f, "like"),
            ReactionKind::Dislike => write!(f, "dislike"),
        }
    }
}

/// Toggle `user_id`'s reaction of the given kind on the item.
///
/// Reacting with a kind the user already holds removes it. Reacting with the
/// opposite kind switches sides: the user leaves the other set in the same
/// transition. The sets never hold duplicates and a user is never in both at
/// once.
pub fn apply_reaction(item: &mut ContentItem, user_id: UserId, kind: ReactionKind) {
    let (same, opposite) = match kind {
        ReactionKind::Like => (&mut item.likes.0, &mut item.dislikes.0),
        ReactionKind::Dislike => (&mut item.dislikes.0, &mut item.likes.0),
    };

    if same.contains(&user_id) {
        same.retain(|reactor| *reactor != user_id);
    } else {
        same.push(user_id);
        opposite.retain(|reactor| *reactor != user_id);
    }

    item.likes_count = item.likes.len() as i32;
    item.dislikes_count = item.dislikes.len() as i32;
}

/// Append a comment to the item.
///
/// The text must be non-empty after trimming; nothing is mutated when it is
/// not. Returns the ID of the new comment.
pub fn add_comment(
    item: &mut ContentItem,
    author_id: UserId,
    text: &str,
    attachment_url: Option<String>,
) -> Result<CommentId> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::validation("comment text is required"));
    }

    let comment = Comment {
        id: CommentId::new(),
        author_id,
        text: text.to_string(),
        attachment_url,
        created_at: Utc::now(),
        replies: Vec::new(),
    };
    let comment_id = comment.id;
    item.comments.push(comment);
    Ok(comment_id)
}

/// Append a reply under an existing comment.
///
/// Fails with `NotFound` when the comment is not on this item and with a
/// validation error when the text is empty; either way the item is left
/// untouched.
pub fn add_reply(
    item: &mut ContentItem,
    comment_id: CommentId,
    author_id: UserId,
    text: &str,
) -> Result<ReplyId> {
    let comment = item
        .comments
        .iter_mut()
        .find(|comment| comment.id == comment_id)
        .ok_or(Error::NotFound("comment"))?;

    let text = text.trim();
    if text.is_empty() {
        return Err(Error::validation("reply text is required"));
    }

    let reply = Reply {
        id: ReplyId::new(),
        author_id,
        text: text.to_string(),
        created_at: Utc::now(),
    };
    let reply_id = reply.id;
    comment.replies.push(reply);
    Ok(reply_id)
}

/// Link an already-stored file to the item.
pub fn add_attachment(
    item: &mut ContentItem,
    uploader_id: UserId,
    file_name: &str,
    url: String,
) -> Result<AttachmentId> {
    let file_name = file_name.trim();
    if file_name.is_empty() {
        return Err(Error::validation("file name is required"));
    }

    let attachment = Attachment {
        id: AttachmentId::new(),
        uploader_id,
        file_name: file_name.to_string(),
        url,
        created_at: Utc::now(),
    };
    let attachment_id = attachment.id;
    item.attachments.push(attachment);
    Ok(attachment_id)
}

/// Add the user to the course's student roster. Enrolling twice is a no-op.
pub fn enroll_student(item: &mut ContentItem, user_id: UserId) -> Result<()> {
    if item.kind != ContentKind::Course {
        return Err(Error::validation("only courses have enrollment"));
    }
    if !item.students.contains(&user_id) {
        item.students.push(user_id);
    }
    Ok(())
}

/// Add a lecturer to the course roster. Assigning twice is a no-op.
pub fn assign_lecturer(item: &mut ContentItem, user_id: UserId) -> Result<()> {
    if item.kind != ContentKind::Course {
        return Err(Error::validation("only courses have lecturers"));
    }
    if !item.lecturers.contains(&user_id) {
        item.lecturers.push(user_id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(kind: ContentKind) -> ContentItem {
        ContentItem::new(
            kind,
            UserId::new(),
            "Grace Hopper".to_string(),
            "Compilers from scratch".to_string(),
            "Session notes and exercises".to_string(),
            "CS-340".to_string(),
            None,
        )
    }

    #[test]
    fn test_like_adds_user_once() {
        let mut post = item(ContentKind::Post);
        let alice = UserId::new();

        apply_reaction(&mut post, alice, ReactionKind::Like);

        assert_eq!(post.likes.0, vec![alice]);
        assert!(post.dislikes.is_empty());
        assert_eq!(post.likes_count, 1);
        assert_eq!(post.dislikes_count, 0);
    }

    #[test]
    fn test_like_twice_round_trips_to_original() {
        let mut post = item(ContentKind::Post);
        let original = post.clone();
        let alice = UserId::new();

        apply_reaction(&mut post, alice, ReactionKind::Like);
        apply_reaction(&mut post, alice, ReactionKind::Like);

        assert_eq!(post, original);
    }

    #[test]
    fn test_dislike_then_like_switches_sides() {
        let mut post = item(ContentKind::Post);
        let alice = UserId::new();

        apply_reaction(&mut post, alice, ReactionKind::Dislike);
        assert_eq!(post.dislikes.0, vec![alice]);
        assert_eq!((post.likes_count, post.dislikes_count), (0, 1));

        apply_reaction(&mut post, alice, ReactionKind::Like);
        assert_eq!(post.likes.0, vec![alice]);
        assert!(post.dislikes.is_empty());
        assert_eq!((post.likes_count, post.dislikes_count), (1, 0));
    }

    #[test]
    fn test_reactions_from_several_users_stay_disjoint() {
        let mut post = item(ContentKind::Post);
        let alice = UserId::new();
        let bob = UserId::new();
        let carol = UserId::new();

        apply_reaction(&mut post, alice, ReactionKind::Like);
        apply_reaction(&mut post, bob, ReactionKind::Dislike);
        apply_reaction(&mut post, carol, ReactionKind::Like);
        apply_reaction(&mut post, bob, ReactionKind::Like);

        assert_eq!(post.likes.0, vec![alice, carol, bob]);
        assert!(post.dislikes.is_empty());
        for liker in post.likes.iter() {
            assert!(!post.dislikes.contains(liker));
        }
        assert_eq!((post.likes_count, post.dislikes_count), (3, 0));
    }

    #[test]
    fn test_toggle_never_duplicates_a_user() {
        let mut post = item(ContentKind::Post);
        let alice = UserId::new();

        for _ in 0..5 {
            apply_reaction(&mut post, alice, ReactionKind::Like);
        }

        // Odd number of toggles leaves exactly one entry
        assert_eq!(post.likes.0, vec![alice]);
        assert_eq!(post.likes_count, 1);
    }

    #[test]
    fn test_counters_always_match_cardinality() {
        let mut post = item(ContentKind::Post);
        let users: Vec<UserId> = (0..4).map(|_| UserId::new()).collect();
        let moves = [
            (0, ReactionKind::Like),
            (1, ReactionKind::Dislike),
            (0, ReactionKind::Dislike),
            (2, ReactionKind::Like),
            (1, ReactionKind::Dislike),
            (3, ReactionKind::Like),
            (0, ReactionKind::Dislike),
        ];

        for (user, kind) in moves {
            apply_reaction(&mut post, users[user], kind);
            assert_eq!(post.likes_count as usize, post.likes.len());
            assert_eq!(post.dislikes_count as usize, post.dislikes.len());
            assert!(post.likes_count >= 0);
            assert!(post.dislikes_count >= 0);
        }
    }

    #[test]
    fn test_counters_recover_from_drift() {
        let mut post = item(ContentKind::Post);
        post.likes_count = -5;
        post.dislikes_count = 99;

        apply_reaction(&mut post, UserId::new(), ReactionKind::Like);

        assert_eq!(post.likes_count, 1);
        assert_eq!(post.dislikes_count, 0);
    }

    #[test]
    fn test_comments_append_in_order() {
        let mut post = item(ContentKind::Post);
        let alice = UserId::new();

        add_comment(&mut post, alice, "first", None).unwrap();
        add_comment(&mut post, alice, "second", None).unwrap();

        assert_eq!(post.comments.len(), 2);
        assert_eq!(post.comments[0].text, "first");
        assert_eq!(post.comments[1].text, "second");
    }

    #[test]
    fn test_comment_text_is_trimmed() {
        let mut post = item(ContentKind::Post);

        add_comment(&mut post, UserId::new(), "  spaced out  ", None).unwrap();

        assert_eq!(post.comments[0].text, "spaced out");
    }

    #[test]
    fn test_empty_comment_is_rejected_without_mutation() {
        let mut post = item(ContentKind::Post);
        let original = post.clone();

        for text in ["", "   ", "\n\t"] {
            let err = add_comment(&mut post, UserId::new(), text, None).unwrap_err();
            assert!(matches!(err, Error::Validation(_)));
        }

        assert_eq!(post, original);
    }

    #[test]
    fn test_comment_keeps_attachment_url() {
        let mut post = item(ContentKind::Post);

        add_comment(
            &mut post,
            UserId::new(),
            "see the worksheet",
            Some("https://cdn.example/worksheet.pdf".to_string()),
        )
        .unwrap();

        assert_eq!(
            post.comments[0].attachment_url.as_deref(),
            Some("https://cdn.example/worksheet.pdf")
        );
    }

    #[test]
    fn test_reply_nests_under_the_right_comment() {
        let mut post = item(ContentKind::Post);
        let alice = UserId::new();
        let first = add_comment(&mut post, alice, "first", None).unwrap();
        add_comment(&mut post, alice, "second", None).unwrap();

        add_reply(&mut post, first, UserId::new(), "agreed").unwrap();

        assert_eq!(post.comments[0].replies.len(), 1);
        assert_eq!(post.comments[0].replies[0].text, "agreed");
        assert!(post.comments[1].replies.is_empty());
    }

    #[test]
    fn test_reply_to_missing_comment_is_not_found() {
        let mut post = item(ContentKind::Post);
        add_comment(&mut post, UserId::new(), "only comment", None).unwrap();
        let original = post.clone();

        let err = add_reply(&mut post, CommentId::new(), UserId::new(), "hello").unwrap_err();

        assert!(matches!(err, Error::NotFound("comment")));
        assert_eq!(post, original);
    }

    #[test]
    fn test_empty_reply_is_rejected_without_mutation() {
        let mut post = item(ContentKind::Post);
        let comment_id = add_comment(&mut post, UserId::new(), "first", None).unwrap();
        let original = post.clone();

        let err = add_reply(&mut post, comment_id, UserId::new(), "   ").unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(post, original);
    }

    #[test]
    fn test_reactions_and_comments_commute() {
        let alice = UserId::new();
        let bob = UserId::new();

        let base = item(ContentKind::Post);
        let mut react_first = base.clone();
        let mut comment_first = base.clone();

        apply_reaction(&mut react_first, alice, ReactionKind::Like);
        add_comment(&mut react_first, bob, "nice one", None).unwrap();

        add_comment(&mut comment_first, bob, "nice one", None).unwrap();
        apply_reaction(&mut comment_first, alice, ReactionKind::Like);

        assert_eq!(react_first.likes, comment_first.likes);
        assert_eq!(react_first.dislikes, comment_first.dislikes);
        assert_eq!(react_first.likes_count, comment_first.likes_count);
        assert_eq!(react_first.dislikes_count, comment_first.dislikes_count);
        assert_eq!(react_first.comments.len(), comment_first.comments.len());
        assert_eq!(react_first.comments[0].text, comment_first.comments[0].text);
    }

    #[test]
    fn test_attachment_appends() {
        let mut course = item(ContentKind::Course);
        let alice = UserId::new();

        add_attachment(
            &mut course,
            alice,
            "syllabus.pdf",
            "https://cdn.example/syllabus.pdf".to_string(),
        )
        .unwrap();

        assert_eq!(course.attachments.len(), 1);
        assert_eq!(course.attachments[0].file_name, "syllabus.pdf");
        assert_eq!(course.attachments[0].uploader_id, alice);
    }

    #[test]
    fn test_attachment_requires_a_file_name() {
        let mut course = item(ContentKind::Course);
        let original = course.clone();

        let err = add_attachment(
            &mut course,
            UserId::new(),
            "  ",
            "https://cdn.example/file".to_string(),
        )
        .unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(course, original);
    }

    #[test]
    fn test_enroll_is_idempotent() {
        let mut course = item(ContentKind::Course);
        let alice = UserId::new();

        enroll_student(&mut course, alice).unwrap();
        enroll_student(&mut course, alice).unwrap();

        assert_eq!(course.students.0, vec![alice]);
    }

    #[test]
    fn test_posts_have_no_enrollment() {
        let mut post = item(ContentKind::Post);

        let err = enroll_student(&mut post, UserId::new()).unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert!(post.students.is_empty());
    }

    #[test]
    fn test_assign_lecturer_is_idempotent_and_course_only() {
        let mut course = item(ContentKind::Course);
        let lecturer = UserId::new();

        assign_lecturer(&mut course, lecturer).unwrap();
        assign_lecturer(&mut course, lecturer).unwrap();
        assert_eq!(course.lecturers.0, vec![lecturer]);

        let mut post = item(ContentKind::Post);
        assert!(assign_lecturer(&mut post, lecturer).is_err());
    }
}
