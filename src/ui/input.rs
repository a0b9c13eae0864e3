//! Command parsing for the TUI
//!
//! The command bar only accepts commands, which start with "/". The code
//! itself is typed into the editor pane.
//!
//! EXIT HANDLING:
//! - /quit, /q, /exit work at any time, even with a request in flight
//! - Ctrl+C exits immediately

use compilab_core::Mode;

/// Parsed command result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    None,
    Quit,                 // /quit, /q, /exit
    Help,                 // /help
    Mode(Mode),           // /mode <lex|sem|full|asm>
    Run,                  // /run
    Example(Option<usize>), // /example [n], 1-based
    Random,               // /random
    Open(String),         // /open <path>
    Clear,                // /clear
    Save(Option<String>), // /save [dir]
    Theme,                // /theme
    Invalid(String),      // known command, bad arguments
    Unknown(String),      // anything else
}

/// Parse command bar input into a Command
///
/// # Examples
/// ```
/// use compilab::ui::input::{parse_command, Command};
/// use compilab_core::Mode;
///
/// assert_eq!(parse_command("/quit"), Command::Quit);
/// assert_eq!(parse_command("/mode asm"), Command::Mode(Mode::Assembly));
/// assert_eq!(parse_command("/example 3"), Command::Example(Some(3)));
/// assert!(matches!(parse_command("hello"), Command::Unknown(_)));
/// ```
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    if input.is_empty() {
        return Command::None;
    }

    let Some(rest) = input.strip_prefix('/') else {
        return Command::Unknown(input.to_string());
    };

    // "/" alone is not a command
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        return Command::None;
    }

    let mut parts = rest.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());

    match (name, arg) {
        ("quit" | "q" | "exit", None) => Command::Quit,
        ("help" | "h", None) => Command::Help,
        ("run" | "r", None) => Command::Run,
        ("random", None) => Command::Random,
        ("clear", None) => Command::Clear,
        ("theme", None) => Command::Theme,
        ("mode" | "m", Some(arg)) => match arg.parse::<Mode>() {
            Ok(mode) => Command::Mode(mode),
            Err(e) => Command::Invalid(e.to_string()),
        },
        ("mode" | "m", None) => Command::Invalid("/mode <lex|sem|full|asm>".to_string()),
        ("example" | "e", None) => Command::Example(None),
        ("example" | "e", Some(arg)) => match arg.parse::<usize>() {
            Ok(n) if n >= 1 => Command::Example(Some(n)),
            _ => Command::Invalid(format!("/example [n]: '{}' no es un número válido", arg)),
        },
        ("open" | "o", Some(path)) => Command::Open(path.to_string()),
        ("open" | "o", None) => Command::Invalid("/open <ruta>".to_string()),
        ("save" | "s", dir) => Command::Save(dir.map(str::to_string)),
        _ => Command::Unknown(input.to_string()),
    }
}

/// Render help text
pub fn render_help() -> String {
    r#"Compilab — cliente de análisis

TECLAS:
    F5                  Analizar
    F2                  Cambiar de modo
    Tab                 Alternar editor / barra de comandos
    PageUp/PageDown     Desplazar el resultado
    Ctrl+C              Salir

COMANDOS (empiezan con "/"):
    /mode <lex|sem|full|asm>  Seleccionar modo (limpia el resultado)
    /run                      Analizar el código
    /example [n]              Cargar el ejemplo n (por defecto 1)
    /random                   Cargar un ejemplo al azar
    /open <ruta>              Cargar un archivo
    /clear                    Limpiar código y resultado
    /save [dir]               Guardar resultado.txt
    /theme                    Cambiar tema claro/oscuro
    /help                     Mostrar esta ayuda
    /quit, /q, /exit          Salir"#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse_command(""), Command::None);
        assert_eq!(parse_command("   "), Command::None);
        assert_eq!(parse_command("/"), Command::None);
        assert_eq!(parse_command("/ quit"), Command::None);
    }

    #[test]
    fn test_parse_quit_variants() {
        assert_eq!(parse_command("/quit"), Command::Quit);
        assert_eq!(parse_command("/q"), Command::Quit);
        assert_eq!(parse_command("/exit"), Command::Quit);
        assert!(matches!(parse_command("/quit now"), Command::Unknown(_)));
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_command("/mode lex"), Command::Mode(Mode::Lexical));
        assert_eq!(parse_command("/mode sem"), Command::Mode(Mode::Semantic));
        assert_eq!(parse_command("/mode full"), Command::Mode(Mode::Full));
        assert_eq!(parse_command("/m asm"), Command::Mode(Mode::Assembly));
        assert!(matches!(parse_command("/mode cobol"), Command::Invalid(_)));
        assert!(matches!(parse_command("/mode"), Command::Invalid(_)));
    }

    #[test]
    fn test_parse_example() {
        assert_eq!(parse_command("/example"), Command::Example(None));
        assert_eq!(parse_command("/example 4"), Command::Example(Some(4)));
        assert!(matches!(parse_command("/example 0"), Command::Invalid(_)));
        assert!(matches!(parse_command("/example two"), Command::Invalid(_)));
    }

    #[test]
    fn test_parse_open_keeps_spaces_in_path() {
        assert_eq!(
            parse_command("/open my programs/loop.asm"),
            Command::Open("my programs/loop.asm".to_string())
        );
        assert!(matches!(parse_command("/open"), Command::Invalid(_)));
    }

    #[test]
    fn test_parse_save() {
        assert_eq!(parse_command("/save"), Command::Save(None));
        assert_eq!(
            parse_command("/save /tmp/out"),
            Command::Save(Some("/tmp/out".to_string()))
        );
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command("/run"), Command::Run);
        assert_eq!(parse_command("/random"), Command::Random);
        assert_eq!(parse_command("/clear"), Command::Clear);
        assert_eq!(parse_command("/theme"), Command::Theme);
        assert_eq!(parse_command("/help"), Command::Help);
    }

    #[test]
    fn test_plain_text_is_unknown() {
        assert_eq!(
            parse_command("print 1"),
            Command::Unknown("print 1".to_string())
        );
    }

    #[test]
    fn test_help_lists_commands() {
        let help = render_help();
        for cmd in ["/mode", "/run", "/example", "/random", "/open", "/clear", "/save", "/theme"] {
            assert!(help.contains(cmd), "help is missing {}", cmd);
        }
    }
}
