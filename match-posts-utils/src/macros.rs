#[macro_export]
macro_rules! selector {
    ($e: expr) => {{
        use ::once_cell::sync::Lazy;
        use ::scraper::Selector;
        static SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse($e).unwrap());
        &*SELECTOR
    }};
}

#[macro_export]
macro_rules! regex {
    ($e: expr) => {{
        use ::once_cell::sync::Lazy;
        use ::regex::Regex;
        static PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new($e).unwrap());
        &*PATTERN
    }};
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    #[test]
    fn macros_compile_once_and_match() {
        let html = Html::parse_fragment(r#"<p class="x">a</p><p>b</p>"#);
        assert_eq!(html.select(selector!("p.x")).count(), 1);
        for _ in 0..2 {
            assert!(regex!(r"^\d+:\d+$").is_match("20:45"));
        }
    }
}
