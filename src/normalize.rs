//! Post-transpilation source normalization.
//!
//! The transpiler's output shape is narrow and stable, so the rewrite works
//! on whole-file text with three regular-expression substitutions applied in
//! a fixed order. A rule whose pattern does not match leaves the text alone.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    /// `"use strict";` followed by the `__esModule` interop marker.
    static ref ES_MODULE_PROLOGUE: Regex = Regex::new(
        r#""use strict";\s*Object\.defineProperty\(exports,\s*"__esModule",\s*\{\s*value:\s*true\s*\}\);?"#
    )
    .expect("valid prologue pattern");

    /// `exports.default =`, with a leading `.` or `$` captured so member
    /// accesses and `$exports` can be left alone.
    static ref DEFAULT_EXPORT: Regex =
        Regex::new(r"([.$])?\bexports\.default(\s*)=").expect("valid default-export pattern");

    /// `<alias>.default` where the alias ends in `_<digits>`.
    static ref INTEROP_DEFAULT: Regex =
        Regex::new(r"\b((?:[A-Za-z_$][\w$]*)?_\d+)\.default\b").expect("valid interop pattern");
}

/// Normalizes one transpiled module body.
///
/// Pure and idempotent: `normalize(&normalize(x)) == normalize(x)`.
#[must_use]
pub fn normalize(code: &str) -> String {
    let code = strip_module_prologue(code);
    let code = rewrite_default_export(&code);
    collapse_interop_default(&code).into_owned()
}

/// Removes the strict-mode prologue and `__esModule` marker.
#[must_use]
pub fn strip_module_prologue(code: &str) -> Cow<'_, str> {
    ES_MODULE_PROLOGUE.replace_all(code, "")
}

/// Rewrites `exports.default = X` into `module.exports = X`.
#[must_use]
pub fn rewrite_default_export(code: &str) -> Cow<'_, str> {
    DEFAULT_EXPORT.replace_all(code, |caps: &Captures<'_>| {
        if caps.get(1).is_some() {
            caps[0].to_string()
        } else {
            format!("module.exports{}=", &caps[2])
        }
    })
}

/// Collapses `_3.default` (and `name_3.default`) to the bare alias.
#[must_use]
pub fn collapse_interop_default(code: &str) -> Cow<'_, str> {
    INTEROP_DEFAULT.replace_all(code, "$1")
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSPILED: &str = r#""use strict";
Object.defineProperty(exports, "__esModule", { value: true });
const view_1 = require("./view");
const _2 = require("../util");
exports.default = view_1.default.extend({
    render() { return _2.default.format(this.data); }
});
"#;

    #[test]
    fn normalizes_typical_module() {
        let out = normalize(TRANSPILED);
        assert!(!out.contains("use strict"));
        assert!(!out.contains("__esModule"));
        assert!(out.contains("module.exports = view_1.extend({"));
        assert!(out.contains("return _2.format(this.data);"));
        assert!(!out.contains("exports.default"));
    }

    #[test]
    fn is_idempotent() {
        for code in [TRANSPILED, "exports.default=exports.default=1;", "_a_3.default.x"] {
            let once = normalize(code);
            assert_eq!(normalize(&once), once, "input: {code}");
        }
    }

    #[test]
    fn rewrites_chained_default_exports_in_one_pass() {
        assert_eq!(
            normalize("exports.default=exports.default=1;"),
            "module.exports=module.exports=1;"
        );
        assert_eq!(normalize("a = exports.default = b;"), "a = module.exports = b;");
    }

    #[test]
    fn leaves_unrelated_text_untouched() {
        let code = "const a = foo.default;\nmodule.exports = a;\nconsole.log('use strict');\n";
        assert_eq!(normalize(code), code);
    }

    #[test]
    fn rewrites_default_export_preserving_spacing() {
        assert_eq!(normalize("exports.default = expr;"), "module.exports = expr;");
        assert_eq!(normalize("exports.default=expr;"), "module.exports=expr;");
    }

    #[test]
    fn does_not_double_prefix_module_exports() {
        let code = "module.exports.default = x;";
        assert_eq!(normalize(code), code);
        assert_eq!(normalize("$exports.default = x;"), "$exports.default = x;");
        assert_eq!(normalize("my_exports.default = x;"), "my_exports.default = x;");
    }

    #[test]
    fn collapses_only_generated_aliases() {
        assert_eq!(normalize("_3.default()"), "_3()");
        assert_eq!(normalize("_1234.default.x"), "_1234.x");
        assert_eq!(normalize("index_1.default"), "index_1");
        assert_eq!(normalize("foo.default"), "foo.default");
        assert_eq!(normalize("_3.defaults"), "_3.defaults");
        assert_eq!(normalize("_a.default"), "_a.default");
        assert_eq!(normalize("_a_3.default()"), "_a_3()");
    }

    #[test]
    fn strips_prologue_without_trailing_semicolon() {
        let code = "\"use strict\";Object.defineProperty(exports,\"__esModule\",{value:true})\nx();";
        assert_eq!(normalize(code), "\nx();");
    }
}
