//! Backend error text → human guidance
//!
//! An ordered rule table, scanned first-match-wins. Specific rules must come
//! before generic ones: "Expected IDENTIFIER but got KEYWORD" often arrives
//! wrapped in a `SyntaxError`, and must not be answered by the generic
//! syntax rule.

use regex::{Regex, RegexBuilder};
use std::sync::OnceLock;

/// Label for messages no rule explains
pub const FALLBACK_LABEL: &str = "Detalle técnico";

/// (pattern, explanation); order is significant
const CATALOG: &[(&str, &str)] = &[
    (
        r"expected identifier but got keyword|esperaba identifier, obtuve keyword",
        "Se esperaba un identificador pero se encontró una palabra reservada. \
         Revisa que no estés usando una palabra clave (por ejemplo def, return, etc.) \
         donde debería ir el nombre de una variable o función.",
    ),
    (
        r"UnboundLocalError.*?total_tokens",
        "El compilador interno intentó usar la variable total_tokens antes de inicializarla. \
         Es un problema de la lógica del analizador, no de tu código fuente. \
         Informa al equipo de desarrollo.",
    ),
    (
        r"modo de an[aá]lisis no reconocido",
        "El servidor no reconoce el modo de análisis solicitado. \
         Verifica que el cliente y el backend sean de la misma versión.",
    ),
    (
        r"etiqueta no definida",
        "El programa salta a una etiqueta que no existe. \
         Declara la etiqueta (por ejemplo FIN:) o corrige el nombre en la instrucción de salto.",
    ),
    (
        r"instrucci[oó]n desconocida",
        "Hay una instrucción que el ensamblador no reconoce. Las instrucciones válidas son \
         MOV, ADD, SUB, MUL, DIV, AND, OR, NOT, CMP, JMP, JNE, PRINT y HALT.",
    ),
    (
        r"espera \d+ argumento",
        "Una instrucción recibió un número incorrecto de argumentos. \
         Revisa que los operandos estén completos y separados por comas.",
    ),
    (
        r"no es un registro v[aá]lido|registro inv[aá]lido",
        "Se usó un registro que no existe o no está permitido. Registros válidos: \
         A, B, C, D, E, H, L, AF, BC, DE, HL, IX, IY, SP y PC.",
    ),
    (
        r"divisi[oó]n por cero",
        "El programa intenta dividir entre cero. \
         Verifica el valor del divisor antes de la instrucción DIV.",
    ),
    (
        r"variable '.*' no definida|variable no declarada|identificador no declarado",
        "Se usa una variable que no ha sido definida. Asígnale un valor antes de usarla.",
    ),
    (
        r"'break' fuera de",
        "Se usó break fuera de un bucle. break solo puede aparecer dentro de while o for.",
    ),
    (
        r"builtin '.*' no soportado",
        "Se llamó a una función integrada que el intérprete no soporta. \
         Usa solo las funciones disponibles, como print o len.",
    ),
    (
        r"operador .* no soportado",
        "El programa usa un operador que el intérprete todavía no soporta.",
    ),
    (
        r"no tiene m[eé]todo",
        "Se llamó a un método que el objeto no tiene. Revisa el nombre del método (por ejemplo append).",
    ),
    (
        r"esperaba '.*', obtuve",
        "Falta un símbolo esperado. Verifica los dos puntos al final de if, while y def, \
         y que paréntesis y corchetes estén cerrados.",
    ),
    (
        r"sentencia no reconocida",
        "El analizador no reconoce el inicio de una sentencia. \
         Revisa la primera palabra de la línea y la sangría.",
    ),
    (
        r"expresi[oó]n inesperada",
        "Hay una expresión incompleta o mal formada. \
         Revisa operadores sin operando y paréntesis sin cerrar.",
    ),
    (
        r"esperaba \w+, obtuve|expected \w+ but got",
        "Se encontró un elemento distinto al esperado. Revisa el orden de los elementos de la línea.",
    ),
    (
        r"SyntaxError|invalid syntax|error de sintaxis",
        "Hay un error de sintaxis en tu código. Verifica paréntesis, dos puntos y sangrías.",
    ),
];

/// One translation rule
#[derive(Debug, Clone)]
pub struct TranslationRule {
    pattern: Regex,
    human: String,
}

impl TranslationRule {
    /// Build a case-insensitive rule
    pub fn new(pattern: &str, human: impl Into<String>) -> Result<Self, regex::Error> {
        let pattern = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self {
            pattern,
            human: human.into(),
        })
    }

    pub fn matches(&self, raw: &str) -> bool {
        self.pattern.is_match(raw)
    }

    pub fn human(&self) -> &str {
        &self.human
    }
}

/// Ordered, first-match-wins translator
#[derive(Debug, Clone)]
pub struct ErrorTranslator {
    rules: Vec<TranslationRule>,
}

impl Default for ErrorTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorTranslator {
    /// Translator loaded with the built-in catalog
    pub fn new() -> Self {
        let rules = CATALOG
            .iter()
            .filter_map(|(pattern, human)| match TranslationRule::new(pattern, *human) {
                Ok(rule) => Some(rule),
                Err(e) => {
                    tracing::error!(pattern, error = %e, "skipping invalid translation rule");
                    None
                }
            })
            .collect();
        Self { rules }
    }

    /// Translator over an explicit rule list
    pub fn with_rules(rules: Vec<TranslationRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[TranslationRule] {
        &self.rules
    }

    /// Index of the first rule matching `raw`
    pub fn matched_rule(&self, raw: &str) -> Option<usize> {
        self.rules.iter().position(|rule| rule.matches(raw))
    }

    /// Human explanation for a raw backend message
    pub fn translate(&self, raw: &str) -> String {
        match self.matched_rule(raw) {
            Some(index) => {
                tracing::debug!(rule = index, "error message translated");
                self.rules[index].human.clone()
            }
            None => {
                tracing::warn!(raw, "no translation rule matched backend error");
                format!("{}: {}", FALLBACK_LABEL, raw)
            }
        }
    }
}

/// Translate with the shared built-in catalog
pub fn translate(raw: &str) -> String {
    static TRANSLATOR: OnceLock<ErrorTranslator> = OnceLock::new();
    TRANSLATOR.get_or_init(ErrorTranslator::new).translate(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENERIC_SYNTAX: &str =
        "Hay un error de sintaxis en tu código. Verifica paréntesis, dos puntos y sangrías.";

    #[test]
    fn test_catalog_compiles_completely() {
        assert_eq!(ErrorTranslator::new().rules().len(), CATALOG.len());
    }

    #[test]
    fn test_generic_syntax_error() {
        let human = translate("SyntaxError: invalid syntax");
        assert_eq!(human, GENERIC_SYNTAX);
        assert!(!human.starts_with(FALLBACK_LABEL));
    }

    #[test]
    fn test_specific_rule_wins_over_generic() {
        let human = translate("SyntaxError: Expected IDENTIFIER but got KEYWORD");
        assert!(human.contains("identificador"));
        assert_ne!(human, GENERIC_SYNTAX);
    }

    #[test]
    fn test_case_insensitive() {
        let human = translate("DIVisión por cero en línea 4");
        assert!(human.contains("dividir entre cero"));
    }

    #[test]
    fn test_backend_messages_are_covered() {
        let known = [
            "Esperaba IDENTIFIER, obtuve KEYWORD:def",
            "Esperaba ':', obtuve 'print'",
            "Sentencia no reconocida a partir de OPERATOR:+",
            "Expresión inesperada en PUNCTUATION:)",
            "Etiqueta no definida: 'NO_EXISTE' en línea 1",
            "Instrucción desconocida: 'FOO' en línea 2",
            "MOV espera 2 argumento(s), pero recibió 1 en línea 1",
            "'BC' no es un registro válido en la instrucción 'MOV' en línea 1",
            "Registro inválido o no permitido: 'BC'",
            "Variable 'x' no definida.",
            "Builtin 'input' no soportado.",
            "Operador binario '%' no soportado.",
            "Objeto no tiene método 'pop'.",
            "'break' fuera de contexto soportado (no implementado).",
            "Modo de análisis no reconocido: foo",
            "UnboundLocalError: local variable 'total_tokens' referenced before assignment",
        ];
        for raw in known {
            assert!(
                !translate(raw).starts_with(FALLBACK_LABEL),
                "no rule for backend message: {raw}"
            );
        }
    }

    #[test]
    fn test_expected_keyword_spanish_form_uses_specific_rule() {
        let translator = ErrorTranslator::new();
        assert_eq!(
            translator.matched_rule("Esperaba IDENTIFIER, obtuve KEYWORD:def"),
            Some(0)
        );
    }

    #[test]
    fn test_fallback_echoes_raw() {
        assert_eq!(
            translate("segfault in the flux capacitor"),
            "Detalle técnico: segfault in the flux capacitor"
        );
    }

    #[test]
    fn test_first_match_wins() {
        let translator = ErrorTranslator::with_rules(vec![
            TranslationRule::new("boom", "first").unwrap(),
            TranslationRule::new("bo+m", "second").unwrap(),
        ]);
        assert_eq!(translator.translate("BOOM"), "first");
        assert_eq!(translator.translate("booom"), "second");
    }

    #[test]
    fn test_deterministic() {
        let raw = "Etiqueta no definida: 'X'";
        assert_eq!(translate(raw), translate(raw));
    }
}
