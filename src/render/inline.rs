//! Renderers for the remaining documentation tags: block sections
//! (summary, remarks, returns, ...) and inline markup (see, c, code, ...).

use super::{collapse_whitespace, RendererPool};
use crate::identifier::strip_generic_suffix;
use crate::model::Element;
use regex::Regex;
use std::sync::LazyLock;

static RE_CREF_PARAMS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(.*\)$").unwrap());

pub(super) fn register(pool: &mut RendererPool) {
    pool.register("assembly", assembly);
    pool.register("summary", summary);
    pool.register("remarks", remarks);
    pool.register("returns", returns);
    pool.register("value", value);
    pool.register("typeparam", typeparam);
    pool.register("exception", exception);
    pool.register("example", example);
    pool.register("code", code);
    pool.register("para", para);
    pool.register("c", inline_code);
    pool.register("paramref", name_ref);
    pool.register("typeparamref", name_ref);
    pool.register("see", see);
    pool.register("seealso", see);
}

/// Mixed content with the outer whitespace trimmed.
fn body(pool: &RendererPool, el: &Element) -> String {
    pool.render_mixed(el).trim().to_string()
}

fn non_empty(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}

fn assembly(pool: &RendererPool, el: &Element) -> Option<String> {
    let name = el.elements_named("name").next()?.deep_text();
    let name = non_empty(name.trim().to_string())?;
    let nl = pool.nl();
    Some(format!("# {name}{nl}{nl}"))
}

fn summary(pool: &RendererPool, el: &Element) -> Option<String> {
    let body = non_empty(body(pool, el))?;
    let nl = pool.nl();
    Some(format!("{body}{nl}{nl}"))
}

fn remarks(pool: &RendererPool, el: &Element) -> Option<String> {
    let body = non_empty(body(pool, el))?;
    let nl = pool.nl();
    Some(format!("**Remarks:** {body}{nl}{nl}"))
}

fn returns(pool: &RendererPool, el: &Element) -> Option<String> {
    Some(format!("\tReturns: {} {}", body(pool, el), pool.nl()))
}

fn value(pool: &RendererPool, el: &Element) -> Option<String> {
    Some(format!("\tValue: {} {}", body(pool, el), pool.nl()))
}

fn typeparam(pool: &RendererPool, el: &Element) -> Option<String> {
    let name = el.attr("name")?;
    Some(format!(
        "\tType parameter {}: {} {}",
        name,
        body(pool, el),
        pool.nl()
    ))
}

fn exception(pool: &RendererPool, el: &Element) -> Option<String> {
    let cref = el.attr("cref")?;
    Some(format!(
        "\tException {}: {} {}",
        short_cref(cref),
        body(pool, el),
        pool.nl()
    ))
}

fn example(pool: &RendererPool, el: &Element) -> Option<String> {
    let body = non_empty(body(pool, el))?;
    let nl = pool.nl();
    Some(format!("**Example:**{nl}{body}{nl}"))
}

fn code(pool: &RendererPool, el: &Element) -> Option<String> {
    let text = non_empty(unindent(&el.deep_text()))?;
    let nl = pool.nl();
    let text = text.replace('\n', nl);
    Some(format!("{nl}```{nl}{text}{nl}```{nl}"))
}

fn para(pool: &RendererPool, el: &Element) -> Option<String> {
    let body = non_empty(body(pool, el))?;
    let nl = pool.nl();
    Some(format!("{nl}{body}{nl}"))
}

fn inline_code(_pool: &RendererPool, el: &Element) -> Option<String> {
    let text = non_empty(collapse_whitespace(&el.deep_text()).trim().to_string())?;
    Some(format!("`{}`", text))
}

fn name_ref(_pool: &RendererPool, el: &Element) -> Option<String> {
    Some(format!("`{}`", el.attr("name")?))
}

/// `see` / `seealso`: external link, language keyword or code reference.
fn see(_pool: &RendererPool, el: &Element) -> Option<String> {
    let text = collapse_whitespace(&el.deep_text()).trim().to_string();

    if let Some(href) = el.attr("href") {
        let label = if text.is_empty() { href } else { text.as_str() };
        return Some(format!("[{}]({})", label, href));
    }
    if let Some(keyword) = el.attr("langword") {
        return Some(format!("`{}`", keyword));
    }
    let cref = el.attr("cref")?;
    if text.is_empty() {
        Some(format!("`{}`", short_cref(cref)))
    } else {
        Some(format!("`{}`", text))
    }
}

/// Short display form of a code reference: `M:A.B.Run(System.Int32)` → `Run`.
fn short_cref(cref: &str) -> &str {
    let path = cref.split_once(':').map_or(cref, |(_, rest)| rest);
    let path = match RE_CREF_PARAMS.find(path) {
        Some(m) => &path[..m.start()],
        None => path,
    };
    let path = strip_generic_suffix(path);
    path.rsplit('.').next().unwrap_or(path)
}

/// Remove common leading indentation (spaces and tabs) from a multi-line
/// string, dropping blank lines at either end.
fn unindent(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();

    let Some(start) = lines.iter().position(|l| !l.trim().is_empty()) else {
        return String::new();
    };
    let end = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .map_or(lines.len(), |i| i + 1);

    let min_indent = lines[start..end]
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    lines[start..end]
        .iter()
        .map(|l| {
            if l.trim().is_empty() {
                ""
            } else {
                l[min_indent..].trim_end()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
