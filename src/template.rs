//! The shared page chrome: an icon link, a navigation header, a footer, and
//! an optional comment widget. Fragments are spliced into rendered HTML by
//! literal substring replacement against the `<head>`, `<body>` and
//! `</body>` markers the converter emits. A page missing one of the markers
//! simply doesn't receive the corresponding fragment.

use crate::config::{Author, Config};

/// Spliced in directly after `<head>`.
const ICON: &str = r#"<link rel="shortcut icon" href="resources/favicon.png"/>"#;

/// Splices the page chrome into rendered HTML. `page` is the output file
/// name of the page being assembled; entry pages pass it so the comment
/// widget can be addressed to them, the index page passes `None` and gets no
/// widget. The widget lands before the footer.
pub fn apply(html: &str, config: &Config, page: Option<&str>) -> String {
    let mut html = html.replace("<head>", &format!("<head>\n{}", ICON));
    html = html.replace("<body>", &format!("<body>\n{}", header(config)));
    if let (Some(account), Some(filename)) = (&config.comments, page) {
        let url = format!("http://{}/{}", config.domain, filename);
        html = html.replace(
            "</body>",
            &format!("{}</body>", comment_widget(account, &url, filename)),
        );
    }
    html.replace("</body>", &format!("{}</body>", footer(config)))
}

fn header(config: &Config) -> String {
    format!(
        r#"<table style="margin-top: 2em; width: 100%; border: none;">
    <tr style="border: none;">
        <td style="border: none;">
            <a href="index.html">{title}</a>
        </td>
        <td style="border: none; text-align: right;">
            <span style="margin-left: 2em;">
                <a href="index.html">about</a>
            </span>
            <span style="margin-left: 2em;">
                <a href="index.html">posts</a>
            </span>
        </td>
    </tr>
</table>
"#,
        title = config.title,
    )
}

fn footer(config: &Config) -> String {
    let credit = match &config.author {
        Some(Author {
            name,
            email: Some(email),
        }) => format!(
            r#"{} (<a href="mailto:{}">{}</a>)"#,
            name, email, email
        ),
        Some(Author { name, email: None }) => name.clone(),
        None => config.title.clone(),
    };
    format!(
        r#"<p style="font-size: 0.6em;">
  &copy; {}
</p>
"#,
        credit
    )
}

fn comment_widget(account: &str, url: &str, identifier: &str) -> String {
    format!(
        r#"<div id="disqus_thread"></div>
<script>
    var disqus_config = function () {{
        this.page.url = "{url}";
        this.page.identifier = "{identifier}";
    }};
    (function() {{
        var d = document, s = d.createElement('script');
        s.src = 'https://{account}.disqus.com/embed.js';
        s.setAttribute('data-timestamp', +new Date());
        (d.head || d.body).appendChild(s);
    }})();
</script>
"#,
        url = url,
        identifier = identifier,
        account = account,
    )
}
