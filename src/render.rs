use serde::Serialize;
use tera::{Context, Tera};

use crate::models::blog::BlogPost;
use crate::models::forum::{self, ForumPost, Reply};

const FORUM_CATEGORY: &str = "forum_category.html";
const DISCUSSION: &str = "discussion.html";
const BLOG: &str = "blog.html";

pub const EMPTY_CATEGORY: &str = "No discussions in this category yet. Be the first to start one!";

const FORUM_CATEGORY_TPL: &str = r#"<div class="modal forum-modal active" data-category="{{ slug }}">
  <div class="modal-content forum-modal-content">
    <span class="close-modal">&times;</span>
    <div class="forum-modal-header">
      <h2>{{ name }}</h2>
      {% if description %}<p>{{ description }}</p>{% endif %}
    </div>
    {% if posts | length > 0 %}
    <ul class="forum-posts">
      {% for post in posts %}
      <li class="forum-post" data-post="{{ loop.index0 }}">
        <div class="post-avatar">{{ post.avatar }}</div>
        <div class="post-body">
          <h4>{{ post.title }}</h4>
          <p>{{ post.content | truncate(length=120) }}</p>
          <div class="post-meta">
            <span class="post-author">{{ post.author }}</span>
            <span class="post-time">{{ post.time }}</span>
            <span class="post-replies">{{ post.replies }} replies</span>
          </div>
        </div>
      </li>
      {% endfor %}
    </ul>
    {% else %}
    <p class="empty-state">{{ empty_message }}</p>
    {% endif %}
  </div>
</div>"#;

const DISCUSSION_TPL: &str = r#"<div class="modal discussion-modal active" data-category="{{ slug }}">
  <div class="modal-content discussion-modal-content">
    <span class="close-modal">&times;</span>
    <div class="discussion-header">
      <span class="discussion-category">{{ category }}</span>
      <h2>{{ post.title }}</h2>
      <div class="post-meta">
        <span class="post-avatar">{{ post.avatar }}</span>
        <span class="post-author">{{ post.author }}</span>
        <span class="post-time">{{ post.time }}</span>
      </div>
    </div>
    <div class="discussion-body"><p>{{ post.content }}</p></div>
    <h3 class="replies-heading">{{ post.replies }} replies</h3>
    <ul class="discussion-replies">
      {% for reply in replies %}
      <li class="reply">
        <div class="post-avatar">{{ reply.avatar }}</div>
        <div class="reply-body">
          <div class="reply-meta"><strong>{{ reply.author }}</strong> <span>{{ reply.time }}</span></div>
          <p>{{ reply.content }}</p>
        </div>
      </li>
      {% endfor %}
    </ul>
    <div class="reply-form">
      <textarea class="reply-input" placeholder="Share your thoughts..."></textarea>
      <button class="btn btn-primary reply-btn">Post Reply</button>
    </div>
  </div>
</div>"#;

const BLOG_TPL: &str = r#"<div class="modal blog-modal active">
  <div class="modal-content blog-modal-content">
    <span class="close-modal">&times;</span>
    <span class="blog-category">{{ post.category }}</span>
    <h2>{{ post.title }}</h2>
    <div class="blog-meta">
      <span>{{ post.author }}</span>
      <span>{{ post.date }}</span>
      <span>{{ post.read_time }}</span>
    </div>
    <div class="blog-body">
      {% for para in post.body %}<p>{{ para }}</p>
      {% endfor %}
    </div>
  </div>
</div>"#;

// ── View models ───────────────────────────────────────

#[derive(Debug, Serialize)]
struct ForumListView<'a> {
    name: &'a str,
    slug: String,
    description: &'a str,
    posts: &'a [ForumPost],
    empty_message: &'a str,
}

#[derive(Debug, Serialize)]
struct DiscussionView<'a> {
    category: &'a str,
    slug: String,
    post: &'a ForumPost,
    replies: &'a [Reply],
}

#[derive(Debug, Serialize)]
struct BlogView<'a> {
    post: &'a BlogPost,
}

// ── Views ─────────────────────────────────────────────

/// Modal markup builder. Templates are `.html`, so tera escapes every
/// interpolated value.
pub struct Views {
    tera: Tera,
}

impl Views {
    pub fn new() -> Result<Self, String> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (FORUM_CATEGORY, FORUM_CATEGORY_TPL),
            (DISCUSSION, DISCUSSION_TPL),
            (BLOG, BLOG_TPL),
        ])
        .map_err(|e| format!("Template error: {}", e))?;
        Ok(Views { tera })
    }

    fn render<T: Serialize>(&self, template: &str, view: &T) -> Result<String, String> {
        let context = Context::from_serialize(view)
            .map_err(|e| format!("Failed to build context for {}: {}", template, e))?;
        self.tera
            .render(template, &context)
            .map_err(|e| format!("Failed to render {}: {}", template, e))
    }

    /// Post list for a category. Unknown categories get the empty state.
    pub fn forum_category(&self, name: &str) -> Result<String, String> {
        let category = forum::find_category(name);
        let view = ForumListView {
            name,
            slug: slug::slugify(name),
            description: category.map(|c| c.description).unwrap_or(""),
            posts: category.map(|c| c.posts).unwrap_or(&[]),
            empty_message: EMPTY_CATEGORY,
        };
        self.render(FORUM_CATEGORY, &view)
    }

    pub fn discussion(&self, category: &str, post: &ForumPost, replies: &[Reply]) -> Result<String, String> {
        let view = DiscussionView {
            category,
            slug: slug::slugify(category),
            post,
            replies,
        };
        self.render(DISCUSSION, &view)
    }

    pub fn blog(&self, post: &BlogPost) -> Result<String, String> {
        self.render(BLOG, &BlogView { post })
    }
}
