//! HTML rendering for the list page and the create-user form.

use crate::logic::{ListView, NewUserView};
use crate::model::DEFAULT_ACCENT_COLOR;

/// Escape text for use in element content and quoted attribute values
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Accent colors end up inside a style attribute, so only plain hex or
/// alphanumeric color names are echoed back.
fn safe_color(color: &str) -> &str {
    let valid = !color.is_empty()
        && color
            .trim_start_matches('#')
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric());
    if valid {
        color
    } else {
        DEFAULT_ACCENT_COLOR
    }
}

fn page(title: &str, accent_color: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="/styles/main.css">
</head>
<body style="--accent: {accent}">
{body}
</body>
</html>
"#,
        title = escape_html(title),
        accent = safe_color(accent_color),
        body = body,
    )
}

pub fn render_list(view: &ListView) -> String {
    let mut body = String::new();

    body.push_str("<nav class=\"tabs\">\n<form action=\"/user\" method=\"post\">\n");
    for user in &view.users {
        let active = if Some(user.id) == view.current_user_id {
            " active"
        } else {
            ""
        };
        body.push_str(&format!(
            "    <button type=\"submit\" name=\"user\" value=\"{}\" class=\"tab{}\" style=\"background-color: {}\">{}</button>\n",
            user.id,
            active,
            safe_color(&user.color),
            escape_html(&user.name),
        ));
    }
    body.push_str("    <button type=\"submit\" name=\"add\" value=\"new\" class=\"tab\">Add Family Member</button>\n");
    body.push_str("</form>\n</nav>\n");

    body.push_str(&format!(
        "<div class=\"box\" id=\"heading\">\n    <h1>{}</h1>\n</div>\n",
        escape_html(&view.list_title)
    ));

    if let Some(user_id) = view.current_user_id {
        body.push_str(&format!(
            r#"<form class="rename" action="/user/update" method="post">
    <input type="hidden" name="userId" value="{}">
    <input type="text" name="newName" placeholder="Rename" autocomplete="off">
    <button type="submit">Rename</button>
</form>
"#,
            user_id
        ));
    }

    body.push_str("<div class=\"box\">\n");
    for item in &view.list_items {
        let title = escape_html(&item.title);
        body.push_str(&format!(
            r#"    <div class="item">
        <form action="/delete" method="post">
            <input type="checkbox" name="deleteItemId" value="{id}" onchange="this.form.submit()">
        </form>
        <p id="title{id}">{title}</p>
        <form class="edit" action="/edit" method="post">
            <input type="hidden" name="updatedItemId" value="{id}">
            <input type="text" name="updatedItemTitle" value="{title}" autocomplete="off">
            <button type="submit">Save</button>
        </form>
    </div>
"#,
            id = item.id,
            title = title,
        ));
    }
    body.push_str(
        r#"    <form class="item" action="/add" method="post">
        <input type="text" name="newItem" placeholder="New Item" autocomplete="off" autofocus>
        <button class="add" type="submit">+</button>
    </form>
</div>
"#,
    );

    page(&view.list_title, &view.accent_color, &body)
}

pub fn render_new_user(view: &NewUserView) -> String {
    let body = r#"<div class="box" id="heading">
    <h1>Add a family member</h1>
</div>
<form class="box new-user" action="/new" method="post">
    <input type="text" name="name" placeholder="Name" autocomplete="off" autofocus>
    <fieldset class="colors">
        <label><input type="radio" name="color" value="teal"> Teal</label>
        <label><input type="radio" name="color" value="powderblue"> Powder blue</label>
        <label><input type="radio" name="color" value="tomato"> Tomato</label>
        <label><input type="radio" name="color" value="orange"> Orange</label>
        <label><input type="radio" name="color" value="yellowgreen"> Yellow green</label>
    </fieldset>
    <button type="submit">Add</button>
</form>
"#;
    page("New family member", &view.accent_color, body)
}
