//! Built-in example programs
//!
//! Two fixed catalogs: one for the assembly language, one shared by the
//! three source-language modes.

use crate::mode::Mode;
use rand::seq::SliceRandom;

/// One example program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExampleEntry {
    pub title: &'static str,
    pub code: &'static str,
}

/// Example selection errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExampleError {
    #[error("Example {index} out of range (catalog has {len} entries)")]
    OutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, ExampleError>;

const ASSEMBLY_EXAMPLES: &[ExampleEntry] = &[
    ExampleEntry {
        title: "Comparación y salto condicional",
        code: "MOV A, 5\nMOV B, 10\nCMP A, B\nJNE DIF\nPRINT A\nJMP END\n\nDIF:\nPRINT B\n\nEND:\nHALT",
    },
    ExampleEntry {
        title: "Aritmética: ADD, SUB, MUL, DIV",
        code: "MOV D, 3\nMOV E, 4\nADD D, E\nPRINT D\nSUB D, E\nPRINT D\nMUL D, E\nPRINT D\nDIV D, E\nPRINT D",
    },
    ExampleEntry {
        title: "Operadores lógicos: AND y NOT",
        code: "MOV A, 6\nMOV B, 3\nAND A, B\nPRINT A\nNOT B\nPRINT B",
    },
    ExampleEntry {
        title: "Registros HL y SP",
        code: "MOV HL, 1234\nPRINT HL\nMOV SP, 4096\nPRINT SP",
    },
    ExampleEntry {
        title: "HALT con código posterior",
        code: "MOV C, 42\nHALT\nPRINT C",
    },
    ExampleEntry {
        title: "Error: operación inválida",
        code: "; Operación inválida esperada (para test de errores)\nMOV A, BC",
    },
    ExampleEntry {
        title: "Error: salto a etiqueta no existente",
        code: "; Salto a etiqueta no existente\nJMP NO_EXISTE",
    },
];

const SOURCE_EXAMPLES: &[ExampleEntry] = &[
    ExampleEntry {
        title: "Condicional if-elif-else",
        code: "edad = 18\n\nnota = 7\n\nif nota >= 9:\n    print(\"Excelente\")\nelif nota >= 6:\n    print(\"Aprobado\")\nelse:\n    print(\"Reprobado\")",
    },
    ExampleEntry {
        title: "Condicional con and",
        code: "edad = 20\ntiene_ine = True\n\nif edad >= 18 and tiene_ine:\n    print(\"Puedes votar\")",
    },
    ExampleEntry {
        title: "Bucle while",
        code: "contador = 1\nwhile contador <= 5:\n    print(\"Contando:\", contador)\n    contador += 1",
    },
    ExampleEntry {
        title: "Lista + for + append",
        code: "frutas = [\"manzana\", \"banana\", \"cereza\"]\nfrutas.append(\"naranja\")\n\nfor fruta in frutas:\n    print(fruta)",
    },
    ExampleEntry {
        title: "Uso de len()",
        code: "colores = [\"rojo\", \"azul\", \"verde\"]\nprint(\"Número de colores:\", len(colores))\nprint(colores)",
    },
    ExampleEntry {
        title: "Función que suma 1",
        code: "def sumar(a):\n    return a + 1",
    },
    ExampleEntry {
        title: "Asignación y suma",
        code: "x = 5\ny = x + 2\n\nprint(x)\nprint(y)",
    },
];

/// Catalog applicable to a mode
pub fn entries(mode: Mode) -> &'static [ExampleEntry] {
    if mode.is_assembly() {
        ASSEMBLY_EXAMPLES
    } else {
        SOURCE_EXAMPLES
    }
}

/// Pick an example by zero-based index
pub fn pick_example(mode: Mode, index: usize) -> Result<&'static ExampleEntry> {
    let catalog = entries(mode);
    catalog.get(index).ok_or(ExampleError::OutOfRange {
        index,
        len: catalog.len(),
    })
}

/// Pick an example uniformly at random from the mode's catalog
pub fn pick_random_example(mode: Mode) -> &'static ExampleEntry {
    let catalog = entries(mode);
    // Both catalogs are non-empty constants
    catalog
        .choose(&mut rand::thread_rng())
        .unwrap_or(&catalog[0])
}

/// Numbered menu lines, starting at 1
pub fn menu(mode: Mode) -> Vec<String> {
    entries(mode)
        .iter()
        .enumerate()
        .map(|(i, e)| format!("{}. {}", i + 1, e.title))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_modes_share_catalog() {
        assert_eq!(entries(Mode::Lexical), entries(Mode::Semantic));
        assert_eq!(entries(Mode::Semantic), entries(Mode::Full));
        assert_ne!(entries(Mode::Full), entries(Mode::Assembly));
    }

    #[test]
    fn test_pick_by_index() {
        let entry = pick_example(Mode::Assembly, 3).unwrap();
        assert_eq!(entry.title, "Registros HL y SP");
        assert!(entry.code.starts_with("MOV HL, 1234"));

        let entry = pick_example(Mode::Full, 5).unwrap();
        assert_eq!(entry.code, "def sumar(a):\n    return a + 1");
    }

    #[test]
    fn test_pick_out_of_range() {
        let err = pick_example(Mode::Lexical, 7).unwrap_err();
        assert_eq!(err, ExampleError::OutOfRange { index: 7, len: 7 });
    }

    #[test]
    fn test_random_pick_stays_in_catalog() {
        for _ in 0..20 {
            let entry = pick_random_example(Mode::Assembly);
            assert!(entries(Mode::Assembly).contains(entry));
        }
    }

    #[test]
    fn test_menu_is_one_based() {
        let menu = menu(Mode::Lexical);
        assert_eq!(menu.len(), 7);
        assert_eq!(menu[0], "1. Condicional if-elif-else");
    }
}
