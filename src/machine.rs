use crate::machine_helper::MachineState;
use crate::utils::{ctostr, is_tag_whitespace, trace_log};
use crate::{Emitter, Tokenizer};

/// Run one step of the state machine on a non-empty `input`, returning the unconsumed rest.
///
/// A step either consumes input or switches to a state that will consume the same character
/// ("reconsume"), so repeatedly calling this function always terminates.
// Note: This is not implemented as a method on Tokenizer because the emitter and the machine
// helper need to be borrowed independently.
pub(crate) fn consume<'a, E: Emitter>(slf: &mut Tokenizer<E>, input: &'a str) -> &'a str {
    macro_rules! switch_to {
        ($state:expr) => {{
            slf.machine_helper.switch_to($state);
        }};
    }

    macro_rules! emit_current_tag {
        () => {{
            let next_state = slf.emitter.emit_current_tag();
            switch_to!(next_state.map_or(MachineState::Data, MachineState::from));
        }};
    }

    let mut chars = input.chars();
    let c = match chars.next() {
        Some(c) => c,
        None => return input,
    };
    // returning `consumed` advances past `c`, returning `input` reconsumes it in the new state
    let consumed = chars.as_str();

    match slf.machine_helper.state {
        MachineState::Data => match find_tag_open(input) {
            Some(pos) => {
                if pos > 0 {
                    slf.emitter.emit_string(&input[..pos]);
                }
                switch_to!(MachineState::TagOpen);
                &input[pos + 1..]
            }
            None => {
                slf.emitter.emit_string(input);
                ""
            }
        },
        MachineState::TagOpen => match c {
            '!' => {
                switch_to!(MachineState::MarkupDeclarationOpen);
                consumed
            }
            '/' => {
                switch_to!(MachineState::EndTagOpen);
                consumed
            }
            '?' => {
                slf.emitter.init_comment();
                slf.emitter.push_comment("?");
                switch_to!(MachineState::BogusComment);
                consumed
            }
            c if c.is_ascii_alphabetic() => {
                slf.emitter.init_start_tag();
                switch_to!(MachineState::TagName);
                input
            }
            _ => {
                slf.emitter.emit_string("<");
                switch_to!(MachineState::Data);
                input
            }
        },
        MachineState::EndTagOpen => match c {
            c if c.is_ascii_alphabetic() => {
                slf.emitter.init_end_tag();
                switch_to!(MachineState::TagName);
                input
            }
            '>' => {
                trace_log!("machine: dropping `</>`");
                switch_to!(MachineState::Data);
                consumed
            }
            _ => {
                slf.emitter.init_comment();
                switch_to!(MachineState::BogusComment);
                input
            }
        },
        MachineState::TagName => match c {
            c if is_tag_whitespace(c) => {
                switch_to!(MachineState::BeforeAttributeName);
                consumed
            }
            '/' => {
                switch_to!(MachineState::SelfClosingStartTag);
                consumed
            }
            '>' => {
                emit_current_tag!();
                consumed
            }
            c => {
                slf.emitter.push_tag_name(ctostr!(c.to_ascii_lowercase()));
                consumed
            }
        },
        MachineState::BeforeAttributeName => match c {
            c if is_tag_whitespace(c) => consumed,
            '/' | '>' => {
                switch_to!(MachineState::AfterAttributeName);
                input
            }
            '=' => {
                slf.emitter.init_attribute();
                slf.emitter.push_attribute_name("=");
                switch_to!(MachineState::AttributeName);
                consumed
            }
            _ => {
                slf.emitter.init_attribute();
                switch_to!(MachineState::AttributeName);
                input
            }
        },
        MachineState::AttributeName => match c {
            c if is_tag_whitespace(c) || c == '/' || c == '>' => {
                switch_to!(MachineState::AfterAttributeName);
                input
            }
            '=' => {
                switch_to!(MachineState::BeforeAttributeValue);
                consumed
            }
            c => {
                slf.emitter.push_attribute_name(ctostr!(c.to_ascii_lowercase()));
                consumed
            }
        },
        MachineState::AfterAttributeName => match c {
            c if is_tag_whitespace(c) => consumed,
            '/' => {
                switch_to!(MachineState::SelfClosingStartTag);
                consumed
            }
            '=' => {
                switch_to!(MachineState::BeforeAttributeValue);
                consumed
            }
            '>' => {
                emit_current_tag!();
                consumed
            }
            _ => {
                slf.emitter.init_attribute();
                switch_to!(MachineState::AttributeName);
                input
            }
        },
        MachineState::BeforeAttributeValue => match c {
            c if is_tag_whitespace(c) => consumed,
            '"' => {
                switch_to!(MachineState::AttributeValueDoubleQuoted);
                consumed
            }
            '\'' => {
                switch_to!(MachineState::AttributeValueSingleQuoted);
                consumed
            }
            '>' => {
                emit_current_tag!();
                consumed
            }
            _ => {
                switch_to!(MachineState::AttributeValueUnquoted);
                input
            }
        },
        MachineState::AttributeValueDoubleQuoted => {
            read_attribute_value_until(slf, input, '"')
        }
        MachineState::AttributeValueSingleQuoted => {
            read_attribute_value_until(slf, input, '\'')
        }
        MachineState::AttributeValueUnquoted => match c {
            c if is_tag_whitespace(c) => {
                switch_to!(MachineState::BeforeAttributeName);
                consumed
            }
            '>' => {
                emit_current_tag!();
                consumed
            }
            c => {
                slf.emitter.push_attribute_value(ctostr!(c));
                consumed
            }
        },
        MachineState::AfterAttributeValueQuoted => match c {
            c if is_tag_whitespace(c) => {
                switch_to!(MachineState::BeforeAttributeName);
                consumed
            }
            '/' => {
                switch_to!(MachineState::SelfClosingStartTag);
                consumed
            }
            '>' => {
                emit_current_tag!();
                consumed
            }
            _ => {
                switch_to!(MachineState::BeforeAttributeName);
                input
            }
        },
        MachineState::SelfClosingStartTag => match c {
            '>' => {
                slf.emitter.set_self_closing();
                emit_current_tag!();
                consumed
            }
            _ => {
                switch_to!(MachineState::BeforeAttributeName);
                input
            }
        },
        MachineState::MarkupDeclarationOpen => match c {
            '-' => {
                switch_to!(MachineState::MarkupDeclarationDash);
                consumed
            }
            _ => {
                slf.emitter.init_comment();
                switch_to!(MachineState::BogusComment);
                input
            }
        },
        MachineState::MarkupDeclarationDash => {
            slf.emitter.init_comment();
            if c == '-' {
                switch_to!(MachineState::CommentStart);
                consumed
            } else {
                slf.emitter.push_comment("-");
                switch_to!(MachineState::BogusComment);
                input
            }
        }
        MachineState::CommentStart => match c {
            '>' => {
                slf.emitter.emit_current_comment();
                switch_to!(MachineState::Data);
                consumed
            }
            _ => {
                switch_to!(MachineState::Comment);
                input
            }
        },
        MachineState::Comment => match input.find('-') {
            Some(0) => {
                switch_to!(MachineState::CommentEndDash);
                consumed
            }
            Some(pos) => {
                slf.emitter.push_comment(&input[..pos]);
                &input[pos..]
            }
            None => {
                slf.emitter.push_comment(input);
                ""
            }
        },
        MachineState::CommentEndDash => match c {
            '-' => {
                switch_to!(MachineState::CommentEnd);
                consumed
            }
            _ => {
                slf.emitter.push_comment("-");
                switch_to!(MachineState::Comment);
                input
            }
        },
        MachineState::CommentEnd => match c {
            '>' => {
                slf.emitter.emit_current_comment();
                switch_to!(MachineState::Data);
                consumed
            }
            '-' => {
                slf.emitter.push_comment("-");
                consumed
            }
            _ => {
                slf.emitter.push_comment("--");
                switch_to!(MachineState::Comment);
                input
            }
        },
        MachineState::BogusComment => match input.find('>') {
            Some(pos) => {
                slf.emitter.push_comment(&input[..pos]);
                slf.emitter.emit_current_comment();
                switch_to!(MachineState::Data);
                &input[pos + 1..]
            }
            None => {
                slf.emitter.push_comment(input);
                ""
            }
        },
        MachineState::RawText => match find_tag_open(input) {
            Some(pos) => {
                if pos > 0 {
                    slf.emitter.emit_string(&input[..pos]);
                }
                switch_to!(MachineState::RawTextLessThanSign);
                &input[pos + 1..]
            }
            None => {
                slf.emitter.emit_string(input);
                ""
            }
        },
        MachineState::RawTextLessThanSign => match c {
            '/' => {
                slf.machine_helper.temporary_buffer.clear();
                switch_to!(MachineState::RawTextEndTagOpen);
                consumed
            }
            _ => {
                slf.emitter.emit_string("<");
                switch_to!(MachineState::RawText);
                input
            }
        },
        MachineState::RawTextEndTagOpen => match c {
            c if c.is_ascii_alphabetic() => {
                slf.emitter.init_end_tag();
                switch_to!(MachineState::RawTextEndTagName);
                input
            }
            _ => {
                slf.emitter.emit_string("</");
                switch_to!(MachineState::RawText);
                input
            }
        },
        MachineState::RawTextEndTagName => {
            let appropriate = slf.emitter.current_is_appropriate_end_tag_token();
            match c {
                c if is_tag_whitespace(c) && appropriate => {
                    switch_to!(MachineState::BeforeAttributeName);
                    consumed
                }
                '/' if appropriate => {
                    switch_to!(MachineState::SelfClosingStartTag);
                    consumed
                }
                '>' if appropriate => {
                    emit_current_tag!();
                    consumed
                }
                c if c.is_ascii_alphabetic() => {
                    slf.emitter.push_tag_name(ctostr!(c.to_ascii_lowercase()));
                    slf.machine_helper.temporary_buffer.push(c);
                    consumed
                }
                _ => {
                    flush_raw_text_end_tag(slf);
                    switch_to!(MachineState::RawText);
                    input
                }
            }
        }
    }
}

/// Feed the state machine the end of input. Half-read markup that can still be text becomes text,
/// everything else is dropped.
pub(crate) fn consume_eof<E: Emitter>(slf: &mut Tokenizer<E>) {
    trace_log!("machine: eof in {:?}", slf.machine_helper.state);
    match slf.machine_helper.state {
        MachineState::TagOpen | MachineState::RawTextLessThanSign => {
            slf.emitter.emit_string("<");
        }
        MachineState::EndTagOpen | MachineState::RawTextEndTagOpen => {
            slf.emitter.emit_string("</");
        }
        MachineState::RawTextEndTagName => flush_raw_text_end_tag(slf),
        MachineState::MarkupDeclarationOpen => {
            slf.emitter.init_comment();
            slf.emitter.emit_current_comment();
        }
        MachineState::MarkupDeclarationDash => {
            slf.emitter.init_comment();
            slf.emitter.push_comment("-");
            slf.emitter.emit_current_comment();
        }
        MachineState::CommentStart
        | MachineState::Comment
        | MachineState::CommentEndDash
        | MachineState::CommentEnd
        | MachineState::BogusComment => {
            slf.emitter.emit_current_comment();
        }
        MachineState::TagName
        | MachineState::BeforeAttributeName
        | MachineState::AttributeName
        | MachineState::AfterAttributeName
        | MachineState::BeforeAttributeValue
        | MachineState::AttributeValueDoubleQuoted
        | MachineState::AttributeValueSingleQuoted
        | MachineState::AttributeValueUnquoted
        | MachineState::AfterAttributeValueQuoted
        | MachineState::SelfClosingStartTag => {
            trace_log!("machine: dropping incomplete tag");
        }
        MachineState::Data | MachineState::RawText => {}
    }
}

fn read_attribute_value_until<'a, E: Emitter>(
    slf: &mut Tokenizer<E>,
    input: &'a str,
    quote: char,
) -> &'a str {
    match input.find(quote) {
        Some(pos) => {
            if pos > 0 {
                slf.emitter.push_attribute_value(&input[..pos]);
            }
            slf.machine_helper
                .switch_to(MachineState::AfterAttributeValueQuoted);
            &input[pos + 1..]
        }
        None => {
            slf.emitter.push_attribute_value(input);
            ""
        }
    }
}

fn flush_raw_text_end_tag<E: Emitter>(slf: &mut Tokenizer<E>) {
    slf.emitter.emit_string("</");
    slf.emitter.emit_string(&slf.machine_helper.temporary_buffer);
    slf.machine_helper.temporary_buffer.clear();
}

#[inline]
fn find_tag_open(haystack: &str) -> Option<usize> {
    #[cfg(feature = "jetscii")]
    {
        jetscii::ascii_chars!('<').find(haystack)
    }

    #[cfg(not(feature = "jetscii"))]
    {
        haystack.find('<')
    }
}
