//! Inline style validation.
//!
//! Category styles are raw CSS declaration lists destined for `style`
//! attributes. [`parse_declaration_names`] runs one through `cssparser` and
//! rejects text the CSS grammar cannot read as declarations; values are not
//! interpreted (the viewing surface's CSS engine does that), only the
//! declaration structure is checked.

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, Token,
};

/// Parses an inline declaration list, returning the property names.
///
/// An empty list is valid (two of the stock category styles are empty
/// strings). Structural garbage (a missing colon, an empty value) is an
/// error described by the returned message.
pub fn parse_declaration_names(css: &str) -> Result<Vec<String>, String> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);

    let mut decl_parser = InlineDeclarationParser;
    let body_parser = RuleBodyParser::new(&mut parser, &mut decl_parser);

    let mut names = Vec::new();
    for result in body_parser {
        match result {
            Ok(name) => names.push(name),
            Err((error, slice)) => {
                return Err(format!("bad declaration {:?}: {:?}", slice, error.kind));
            }
        }
    }
    Ok(names)
}

struct InlineDeclarationParser;

impl<'i> DeclarationParser<'i> for InlineDeclarationParser {
    type Declaration = String;
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        // Any component values are accepted; the declaration just cannot
        // be empty.
        let mut any_value = false;
        while let Ok(token) = input.next() {
            match token {
                Token::WhiteSpace(_) | Token::Comment(_) => continue,
                _ => any_value = true,
            }
        }
        if any_value {
            Ok(name.as_ref().to_string())
        } else {
            Err(input.new_custom_error::<(), ()>(()))
        }
    }
}

impl<'i> AtRuleParser<'i> for InlineDeclarationParser {
    type Prelude = ();
    type AtRule = String;
    type Error = ();
}

impl<'i> QualifiedRuleParser<'i> for InlineDeclarationParser {
    type Prelude = ();
    type QualifiedRule = String;
    type Error = ();
}

impl<'i> RuleBodyItemParser<'i, String, ()> for InlineDeclarationParser {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}
