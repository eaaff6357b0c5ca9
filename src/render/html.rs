//! Small HTML building blocks shared by every page.

/// Escape text for use in element content and attribute values.
pub fn escape(text: &str) -> String {
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

/// Anchor with escaped href and text.
pub fn link(href: &str, text: &str) -> String {
    format!("<a href=\"{}\">{}</a>", escape(href), escape(text))
}

pub fn heading(level: u8, text: &str) -> String {
    format!("<h{level}>{}</h{level}>\n", escape(text))
}

/// Paragraph of pre-rendered HTML.
pub fn paragraph(html: &str) -> String {
    format!("<p>{}</p>\n", html)
}

/// Bulleted list of pre-rendered HTML items.
pub fn list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::from("<ul>\n");
    for item in items {
        out.push_str(&format!("    <li>{}</li>\n", item.as_ref()));
    }
    out.push_str("</ul>\n");
    out
}

/// Stylesheet and script links for one page, already adjusted for the
/// page's depth below the site root.
#[derive(Debug, Clone, Copy)]
pub struct Assets<'a> {
    pub root: &'a str,
    pub stylesheet: &'a str,
    pub script: &'a str,
}

impl Assets<'_> {
    /// Prefix a site-relative path so it resolves from this page.
    pub fn href(&self, path: &str) -> String {
        format!("{}{}", self.root, path)
    }
}

/// Wrap `body` in a complete document.
pub fn document(title: &str, assets: &Assets, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         \x20 <meta charset=\"utf-8\">\n\
         \x20 <meta name=\"viewport\" content=\"width=device-width, initial-scale=1, shrink-to-fit=no\">\n\
         \x20 <title>{title}</title>\n\
         \x20 <link rel=\"stylesheet\" type=\"text/css\" href=\"{css}\">\n\
         </head>\n\
         \n\
         <body>\n\
         \n\
         {body}\n\
         \x20 <script src=\"{script}\"></script>\n\
         </body>\n\
         </html>\n",
        title = escape(title),
        css = escape(&assets.href(assets.stylesheet)),
        body = body,
        script = escape(&assets.href(assets.script)),
    )
}

/// Sortable table. Cells hold pre-rendered HTML.
#[derive(Debug, Default)]
pub struct Table {
    caption: Option<String>,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            caption: None,
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn with_caption(mut self, caption: &str) -> Self {
        self.caption = Some(caption.to_string());
        self
    }

    pub fn push_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let mut out = String::from("<table class=\"sortable\">\n");
        if let Some(caption) = &self.caption {
            out.push_str(&format!("<caption>{}</caption>\n", escape(caption)));
        }
        out.push_str("<thead>\n<tr>\n");
        for header in &self.headers {
            out.push_str(&format!(
                "    <th onclick=\"sortTable(this)\">{}</th>\n",
                escape(header)
            ));
        }
        out.push_str("</tr>\n</thead>\n<tbody>\n");
        for row in &self.rows {
            out.push_str("<tr>\n");
            for cell in row {
                out.push_str(&format!("    <td>{}</td>\n", cell));
            }
            out.push_str("</tr>\n");
        }
        out.push_str("</tbody>\n</table>\n");
        out
    }
}
