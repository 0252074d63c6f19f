use std::borrow::Cow;

use tracing::trace;

use super::placeholders::{BLOCK_RE, count_placeholders};
use crate::options::SkipScope;
use crate::types::QueryValue;

/// Template text with conditional blocks resolved, plus the arguments still bound to the
/// placeholders that survived.
pub(super) struct Resolved<'t, 'a> {
    pub sql: Cow<'t, str>,
    pub args: Vec<&'a QueryValue>,
}

fn bound<'a>(args: &'a [QueryValue], start: usize, count: usize) -> &'a [QueryValue] {
    let len = args.len();
    &args[start.min(len)..(start + count).min(len)]
}

/// Replace every `{...}` block by its inner text, or by nothing when it is skipped.
///
/// Under `SkipScope::Block`, arguments are bound to placeholders by position in the original
/// template, so the arguments of an omitted block are dropped together with its placeholders.
/// Under `SkipScope::Global` the argument list is left as is and binds to the surviving
/// placeholders in order.
pub(super) fn resolve_blocks<'t, 'a>(
    template: &'t str,
    args: &'a [QueryValue],
    scope: SkipScope,
) -> Resolved<'t, 'a> {
    if !BLOCK_RE.is_match(template) {
        return Resolved {
            sql: Cow::Borrowed(template),
            args: args.iter().collect(),
        };
    }

    let skip_all = scope == SkipScope::Global && args.iter().any(QueryValue::is_skip);
    let mut out = String::with_capacity(template.len());
    let mut kept = Vec::with_capacity(args.len());
    let mut cursor = 0;
    let mut last = 0;

    for caps in BLOCK_RE.captures_iter(template) {
        let (Some(block), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        let gap = &template[last..block.start()];
        let gap_count = count_placeholders(gap);
        kept.extend(bound(args, cursor, gap_count));
        cursor += gap_count;
        out.push_str(gap);

        let inner_count = count_placeholders(inner.as_str());
        let block_args = bound(args, cursor, inner_count);
        let omit = match scope {
            SkipScope::Global => skip_all,
            SkipScope::Block => block_args.iter().any(QueryValue::is_skip),
        };
        if omit {
            trace!(block = block.as_str(), "omitting conditional block");
        } else {
            out.push_str(inner.as_str());
            kept.extend(block_args);
        }
        cursor += inner_count;
        last = block.end();
    }

    out.push_str(&template[last..]);
    let args = match scope {
        SkipScope::Block => {
            kept.extend(args.iter().skip(cursor));
            kept
        }
        SkipScope::Global => args.iter().collect(),
    };

    Resolved {
        sql: Cow::Owned(out),
        args,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::skip;

    fn texts(args: &[&QueryValue]) -> Vec<QueryValue> {
        args.iter().map(|v| (*v).clone()).collect()
    }

    #[test]
    fn no_blocks_borrows_template() {
        let args = [QueryValue::Int(1)];
        let res = resolve_blocks("SELECT ?d", &args, SkipScope::Block);
        assert!(matches!(res.sql, Cow::Borrowed(_)));
        assert_eq!(res.args.len(), 1);
    }

    #[test]
    fn kept_block_is_unwrapped() {
        let args = [QueryValue::Int(5)];
        let res = resolve_blocks("SELECT * FROM t {WHERE id = ?d}", &args, SkipScope::Block);
        assert_eq!(res.sql, "SELECT * FROM t WHERE id = ?d");
        assert_eq!(texts(&res.args), vec![QueryValue::Int(5)]);
    }

    #[test]
    fn block_scope_omits_only_the_skipped_block() {
        let args = [
            QueryValue::from("a"),
            skip(),
            QueryValue::Int(2),
            QueryValue::Int(3),
        ];
        let res = resolve_blocks(
            "?{ AND x = ?d}{ AND y = ?d} LIMIT ?d",
            &args,
            SkipScope::Block,
        );
        assert_eq!(res.sql, "? AND y = ?d LIMIT ?d");
        assert_eq!(
            texts(&res.args),
            vec![QueryValue::from("a"), QueryValue::Int(2), QueryValue::Int(3)]
        );
    }

    #[test]
    fn global_scope_omits_every_block_and_keeps_arguments() {
        let args = [skip(), QueryValue::Int(2)];
        let res = resolve_blocks("{x = ?d}{ AND y = ?d}{ AND z = 1}", &args, SkipScope::Global);
        assert_eq!(res.sql, "");
        assert_eq!(texts(&res.args), vec![skip(), QueryValue::Int(2)]);
    }

    #[test]
    fn block_without_placeholders_survives_block_scope() {
        let args = [skip()];
        let res = resolve_blocks("{a}{b = ?}", &args, SkipScope::Block);
        assert_eq!(res.sql, "a");
        assert!(res.args.is_empty());
    }

    #[test]
    fn surplus_arguments_are_kept_at_the_end() {
        let args = [QueryValue::Int(1), QueryValue::Int(2)];
        let res = resolve_blocks("{?d}", &args, SkipScope::Block);
        assert_eq!(res.sql, "?d");
        assert_eq!(texts(&res.args), vec![QueryValue::Int(1), QueryValue::Int(2)]);
    }
}
