use std::collections::BTreeMap;

use html2csv::{EndTag, StartTag, State, Token, Tokenizer};
use pretty_assertions::assert_eq;

fn tokenize_chunks(chunks: &[&str]) -> Vec<Token> {
    let mut tokenizer = Tokenizer::new();
    let mut tokens = Vec::new();
    for chunk in chunks {
        tokenizer.feed(chunk);
        tokens.extend(tokenizer.tokens());
    }
    tokenizer.finish();
    tokens.extend(tokenizer.tokens());
    tokens
}

fn tokenize(html: &str) -> Vec<Token> {
    tokenize_chunks(&[html])
}

fn start_tag(name: &str, attributes: &[(&str, &str)]) -> Token {
    Token::StartTag(StartTag {
        self_closing: false,
        name: name.to_owned(),
        attributes: attributes
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect::<BTreeMap<_, _>>(),
    })
}

fn end_tag(name: &str) -> Token {
    Token::EndTag(EndTag {
        name: name.to_owned(),
    })
}

fn string(s: &str) -> Token {
    Token::String(s.to_owned())
}

#[test]
fn test_attributes() {
    assert_eq!(
        tokenize(r#"<TD Class="a b" colspan=2 id='x' hidden data-v="1>0">"#),
        vec![start_tag(
            "td",
            &[
                ("class", "a b"),
                ("colspan", "2"),
                ("id", "x"),
                ("hidden", ""),
                ("data-v", "1>0"),
            ]
        )]
    );
}

#[test]
fn test_duplicate_attribute_keeps_first() {
    assert_eq!(
        tokenize("<p a=1 a=2>"),
        vec![start_tag("p", &[("a", "1")])]
    );
}

#[test]
fn test_self_closing() {
    assert_eq!(
        tokenize("<br/><img src=x />"),
        vec![
            Token::StartTag(StartTag {
                self_closing: true,
                name: "br".to_owned(),
                attributes: BTreeMap::new(),
            }),
            Token::StartTag(StartTag {
                self_closing: true,
                name: "img".to_owned(),
                attributes: vec![("src".to_owned(), "x".to_owned())]
                    .into_iter()
                    .collect(),
            }),
        ]
    );
}

#[test]
fn test_text_is_folded_across_chunks() {
    assert_eq!(
        tokenize_chunks(&["<b>he", "l", "lo", " wor", "ld</b>"]),
        vec![start_tag("b", &[]), string("hello world"), end_tag("b")]
    );
}

#[test]
fn test_tag_split_across_chunks() {
    assert_eq!(
        tokenize_chunks(&["<", "t", "d cl", "ass=\"x", " y\"", "/", ">", "<", "/td", ">"]),
        vec![
            Token::StartTag(StartTag {
                self_closing: true,
                name: "td".to_owned(),
                attributes: vec![("class".to_owned(), "x y".to_owned())]
                    .into_iter()
                    .collect(),
            }),
            end_tag("td"),
        ]
    );
}

#[test]
fn test_comments() {
    assert_eq!(
        tokenize("a<!-- x -- y --->b<!---->c<!-->d"),
        vec![
            string("a"),
            Token::Comment(" x -- y -".to_owned()),
            string("b"),
            Token::Comment(String::new()),
            string("c"),
            Token::Comment(String::new()),
            string("d"),
        ]
    );
}

#[test]
fn test_doctype_and_processing_instruction_are_bogus_comments() {
    assert_eq!(
        tokenize("<!DOCTYPE html><?xml version=\"1.0\"?>"),
        vec![
            Token::Comment("DOCTYPE html".to_owned()),
            Token::Comment("?xml version=\"1.0\"?".to_owned()),
        ]
    );
}

#[test]
fn test_stray_less_than_signs() {
    assert_eq!(
        tokenize("a < b <= c <3 </>"),
        vec![string("a < b <= c <3 ")]
    );
}

#[test]
fn test_script_is_raw_text() {
    assert_eq!(
        tokenize_chunks(&["<script>if (a<b) x = '</", "td>';</scr", "ipt>"]),
        vec![
            start_tag("script", &[]),
            string("if (a<b) x = '</td>';"),
            end_tag("script"),
        ]
    );
}

#[test]
fn test_raw_text_end_tag_is_case_insensitive() {
    assert_eq!(
        tokenize("<style>p{}</STYLE ><td>"),
        vec![
            start_tag("style", &[]),
            string("p{}"),
            end_tag("style"),
            start_tag("td", &[]),
        ]
    );
}

#[test]
fn test_set_state() {
    let mut tokenizer = Tokenizer::new();
    tokenizer.emitter_mut().naively_switch_states(false);
    tokenizer.feed("<script><td>");
    tokenizer.set_state(State::Data);
    let tokens: Vec<Token> = tokenizer.tokens().collect();
    assert_eq!(tokens, vec![start_tag("script", &[]), start_tag("td", &[])]);

    tokenizer.set_state(State::RawText);
    tokenizer.feed("<td>");
    tokenizer.finish();
    let tokens: Vec<Token> = tokenizer.tokens().collect();
    assert_eq!(tokens, vec![string("<td>")]);
}

#[test]
fn test_eof_handling() {
    assert_eq!(tokenize("text<"), vec![string("text<")]);
    assert_eq!(tokenize("text</"), vec![string("text</")]);
    assert_eq!(tokenize("text<td class=\"unterminated"), vec![string("text")]);
    assert_eq!(
        tokenize("<!-- open"),
        vec![Token::Comment(" open".to_owned())]
    );
    assert_eq!(
        tokenize("<title>abc</tit"),
        vec![start_tag("title", &[]), string("abc</tit")]
    );
}

#[test]
fn test_finish_resets_for_next_document() {
    let mut tokenizer = Tokenizer::new();
    tokenizer.feed("<script>x");
    tokenizer.finish();
    tokenizer.feed("<td>");
    let tokens: Vec<Token> = tokenizer.tokens().collect();
    assert_eq!(
        tokens,
        vec![start_tag("script", &[]), string("x"), start_tag("td", &[])]
    );
}

#[test]
fn test_next_state() {
    let script = StartTag {
        name: "script".to_owned(),
        ..StartTag::default()
    };
    let td = StartTag {
        name: "td".to_owned(),
        ..StartTag::default()
    };
    assert_eq!(script.next_state(), State::RawText);
    assert_eq!(td.next_state(), State::Data);
}

#[test]
fn test_multibyte_text_and_attributes() {
    assert_eq!(
        tokenize_chunks(&["<td title=\"é", "t\u{e9}\">日本", "語</td>"]),
        vec![
            start_tag("td", &[("title", "été")]),
            string("日本語"),
            end_tag("td"),
        ]
    );
}

#[cfg(debug_assertions)]
#[test]
fn test_state_switches_are_traced() {
    let _ = html2csv::testutils::take_output();
    let mut tokenizer = Tokenizer::new();
    tokenizer.feed("<td>");
    let log = html2csv::testutils::take_output();
    assert!(log.contains("switch_to: Data -> TagOpen"), "{}", log);
    assert!(log.contains("switch_to: TagName -> Data"), "{}", log);
}
