use std::fmt::Write;

use crate::article::ArticleProps;
use crate::config::Config;

const SITE_TITLE: &str = "Decoupled Drupal Articles";

/// Escape text for use in HTML element content and quoted attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render an article page.
///
/// The body markup is inserted verbatim: it is sanitized by the backend's
/// text format, not here.
pub fn render_article_page(config: &Config, locale: &str, props: &ArticleProps) -> String {
    let article = &props.article;
    let title = escape_html(&article.title);

    let mut alternates = String::new();
    for alt in &props.href_lang {
        // Writing to a String cannot fail
        let _ = writeln!(
            alternates,
            r#"    <link rel="alternate" hreflang="{}" href="{}">"#,
            escape_html(&alt.href_lang),
            escape_html(&alt.href)
        );
    }

    let image = match &article.media_image_url {
        Some(url) if !url.is_empty() => format!(
            r#"      <div class="hero"><img src="{}{}" alt="{}"></div>
"#,
            escape_html(&config.image_url),
            escape_html(url),
            title
        ),
        _ => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title} | {site}</title>
{alternates}  </head>
  <body>
    <article class="prose">
      <h1>{title}</h1>
      <a href="/">Home &rarr;</a>
{image}      <div class="body">{body}</div>
    </article>
  </body>
</html>
"#,
        lang = escape_html(locale),
        title = title,
        site = SITE_TITLE,
        alternates = alternates,
        image = image,
        body = article.body_markup(),
    )
}
