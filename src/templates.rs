//! Server-rendered HTML pages.
//!
//! Pages are assembled with plain string building; everything user-supplied
//! goes through html-escape before it reaches the page.

use axum::response::Html;

use crate::models::{PostModel, UserModel};
use crate::response::Page;
use crate::utils::flash::Flash;

/// A field-level validation message, rendered inline next to its input.
#[derive(Debug, Clone)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn esc(value: &str) -> String {
    html_escape::encode_text(value).into_owned()
}

fn esc_attr(value: &str) -> String {
    html_escape::encode_double_quoted_attribute(value).into_owned()
}

fn field_message(errors: &[FieldError], field: &str) -> String {
    errors
        .iter()
        .filter(|e| e.field == field)
        .map(|e| format!(r#"<div class="invalid-feedback">{}</div>"#, esc(&e.message)))
        .collect()
}

fn flash_block(flash: Option<&Flash>) -> String {
    match flash {
        Some(f) => format!(
            r#"<div class="alert alert-{}">{}</div>"#,
            esc_attr(&f.category),
            esc(&f.message)
        ),
        None => String::new(),
    }
}

fn nav(user: Option<&UserModel>) -> String {
    let right = match user {
        Some(u) => format!(
            r#"<a href="/post/new">New Post</a> <a href="/account">{}</a> <a href="/logout">Logout</a>"#,
            esc(&u.username)
        ),
        None => r#"<a href="/login">Login</a> <a href="/register">Register</a>"#.to_string(),
    };
    format!(
        r#"<nav><a class="brand" href="/home">Inklet</a> <a href="/home">Home</a> <a href="/about">About</a> <span class="nav-right">{right}</span></nav>"#
    )
}

fn layout(title: &str, user: Option<&UserModel>, flash: Option<&Flash>, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} - Inklet</title>
</head>
<body>
{nav}
<main>
{flash}
{body}
</main>
</body>
</html>"#,
        title = esc(title),
        nav = nav(user),
        flash = flash_block(flash),
        body = body,
    )
}

fn post_article(title: &str, author: &str, created_at: &chrono::NaiveDateTime, content: &str) -> String {
    format!(
        r#"<article class="post">
<h2>{}</h2>
<p class="meta"><a href="/user/{}">{}</a> on {}</p>
<p>{}</p>
</article>"#,
        esc(title),
        esc_attr(author),
        esc(author),
        created_at.format("%B %e, %Y"),
        esc(content),
    )
}

fn pager<T>(page: &Page<T>, base_path: &str) -> String {
    let mut links = String::new();
    if page.has_prev() {
        links.push_str(&format!(
            r#"<a class="pager-prev" href="{}?page={}">Newer</a> "#,
            base_path,
            page.page - 1
        ));
    }
    if page.has_next() {
        links.push_str(&format!(
            r#"<a class="pager-next" href="{}?page={}">Older</a>"#,
            base_path,
            page.page + 1
        ));
    }
    if links.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="pager">{links}</div>"#)
    }
}

pub fn home_page(
    user: Option<&UserModel>,
    flash: Option<&Flash>,
    posts: &Page<(PostModel, Option<UserModel>)>,
) -> Html<String> {
    let mut body = String::new();
    for (post, author) in &posts.items {
        let author_name = author.as_ref().map(|u| u.username.as_str()).unwrap_or("unknown");
        body.push_str(&post_article(
            &post.title,
            author_name,
            &post.created_at,
            &post.content,
        ));
    }
    if posts.items.is_empty() {
        body.push_str("<p>No posts yet.</p>");
    }
    body.push_str(&pager(posts, "/home"));
    Html(layout("Home", user, flash, &body))
}

pub fn user_posts_page(
    user: Option<&UserModel>,
    flash: Option<&Flash>,
    author: &UserModel,
    posts: &Page<PostModel>,
) -> Html<String> {
    let mut body = format!(
        r#"<div class="author-header"><img src="/static/profile_pics/{}" alt=""><h1>Posts by {} ({})</h1></div>"#,
        esc_attr(&author.image_file),
        esc(&author.username),
        posts.total,
    );
    for post in &posts.items {
        body.push_str(&post_article(
            &post.title,
            &author.username,
            &post.created_at,
            &post.content,
        ));
    }
    body.push_str(&pager(posts, &format!("/user/{}", esc_attr(&author.username))));
    Html(layout(&author.username, user, flash, &body))
}

pub fn about_page(user: Option<&UserModel>, flash: Option<&Flash>) -> Html<String> {
    Html(layout(
        "About",
        user,
        flash,
        "<h1>About</h1><p>A small blog where anyone can register and write.</p>",
    ))
}

pub fn register_page(
    flash: Option<&Flash>,
    username: &str,
    email: &str,
    errors: &[FieldError],
) -> Html<String> {
    let body = format!(
        r#"<h1>Join Today</h1>
<form method="POST" action="/register">
<label for="username">Username</label>
<input type="text" name="username" id="username" value="{username}">
{username_err}
<label for="email">Email</label>
<input type="text" name="email" id="email" value="{email}">
{email_err}
<label for="password">Password</label>
<input type="password" name="password" id="password">
{password_err}
<label for="confirm_password">Confirm Password</label>
<input type="password" name="confirm_password" id="confirm_password">
{confirm_err}
<button type="submit">Sign Up</button>
</form>
<p>Already have an account? <a href="/login">Log In</a></p>"#,
        username = esc_attr(username),
        email = esc_attr(email),
        username_err = field_message(errors, "username"),
        email_err = field_message(errors, "email"),
        password_err = field_message(errors, "password"),
        confirm_err = field_message(errors, "confirm_password"),
    );
    Html(layout("Register", None, flash, &body))
}

pub fn login_page(flash: Option<&Flash>, email: &str, next: &str) -> Html<String> {
    let next_field = if next.is_empty() {
        String::new()
    } else {
        format!(
            r#"<input type="hidden" name="next" value="{}">"#,
            esc_attr(next)
        )
    };
    let body = format!(
        r#"<h1>Log In</h1>
<form method="POST" action="/login">
{next_field}
<label for="email">Email</label>
<input type="text" name="email" id="email" value="{email}">
<label for="password">Password</label>
<input type="password" name="password" id="password">
<label><input type="checkbox" name="remember" value="true"> Remember Me</label>
<button type="submit">Log In</button>
</form>
<p><a href="/reset_password">Forgot Password?</a></p>
<p>Need an account? <a href="/register">Sign Up</a></p>"#,
        email = esc_attr(email),
    );
    Html(layout("Log In", None, flash, &body))
}

pub fn account_page(
    user: &UserModel,
    flash: Option<&Flash>,
    username: &str,
    email: &str,
    errors: &[FieldError],
) -> Html<String> {
    let body = format!(
        r#"<div class="account-header"><img src="/static/profile_pics/{image}" alt=""><h1>{heading}</h1></div>
<form method="POST" action="/account">
<label for="username">Username</label>
<input type="text" name="username" id="username" value="{username}">
{username_err}
<label for="email">Email</label>
<input type="text" name="email" id="email" value="{email}">
{email_err}
<button type="submit">Update</button>
</form>"#,
        image = esc_attr(&user.image_file),
        heading = esc(&user.username),
        username = esc_attr(username),
        email = esc_attr(email),
        username_err = field_message(errors, "username"),
        email_err = field_message(errors, "email"),
    );
    Html(layout("Account", Some(user), flash, &body))
}

pub fn new_post_page(
    user: &UserModel,
    flash: Option<&Flash>,
    title: &str,
    content: &str,
    errors: &[FieldError],
) -> Html<String> {
    let body = format!(
        r#"<h1>New Post</h1>
<form method="POST" action="/post/new">
<label for="title">Title</label>
<input type="text" name="title" id="title" value="{title}">
{title_err}
<label for="content">Content</label>
<textarea name="content" id="content">{content}</textarea>
{content_err}
<button type="submit">Post</button>
</form>"#,
        title = esc_attr(title),
        content = esc(content),
        title_err = field_message(errors, "title"),
        content_err = field_message(errors, "content"),
    );
    Html(layout("New Post", Some(user), flash, &body))
}

pub fn reset_request_page(
    flash: Option<&Flash>,
    email: &str,
    errors: &[FieldError],
) -> Html<String> {
    let body = format!(
        r#"<h1>Reset Password</h1>
<form method="POST" action="/reset_password">
<label for="email">Email</label>
<input type="text" name="email" id="email" value="{email}">
{email_err}
<button type="submit">Request Password Reset</button>
</form>"#,
        email = esc_attr(email),
        email_err = field_message(errors, "email"),
    );
    Html(layout("Reset Password", None, flash, &body))
}

pub fn reset_password_page(
    flash: Option<&Flash>,
    token: &str,
    errors: &[FieldError],
) -> Html<String> {
    let body = format!(
        r#"<h1>Reset Password</h1>
<form method="POST" action="/reset_password/{token}">
<label for="password">Password</label>
<input type="password" name="password" id="password">
{password_err}
<label for="confirm_password">Confirm Password</label>
<input type="password" name="confirm_password" id="confirm_password">
{confirm_err}
<button type="submit">Reset Password</button>
</form>"#,
        token = esc_attr(token),
        password_err = field_message(errors, "password"),
        confirm_err = field_message(errors, "confirm_password"),
    );
    Html(layout("Reset Password", None, flash, &body))
}

pub fn error_page(status: u16, message: &str) -> Html<String> {
    let body = format!("<h1>{}</h1><p>{}</p>", status, esc(message));
    Html(layout(&status.to_string(), None, None, &body))
}
