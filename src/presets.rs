//! Built-in sample programs

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub source: &'static str,
}

pub const PRESETS: &[Preset] = &[
    Preset {
        name: "hello",
        source: "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.",
    },
    Preset {
        name: "alphabet",
        source: "++++++++[>++++++++<-]>+>++++++++++++++++++++++++++[<.+>-]",
    },
    Preset {
        name: "echo",
        source: ",.,.,.",
    },
    Preset {
        name: "snapshots",
        source: "+#>++#>+++#<<[-#]",
    },
    Preset {
        name: "forever",
        source: "+[]",
    },
];

/// Position of the preset called `name` in [`PRESETS`], ignoring case
pub fn index_of(name: &str) -> Option<usize> {
    PRESETS
        .iter()
        .position(|p| p.name.eq_ignore_ascii_case(name))
}

pub fn find(name: &str) -> Option<&'static Preset> {
    index_of(name).map(|index| &PRESETS[index])
}

pub fn names() -> Vec<&'static str> {
    PRESETS.iter().map(|p| p.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::validate;

    #[test]
    fn test_presets_validate() {
        for preset in PRESETS {
            assert!(validate(preset.source).success, "{} is invalid", preset.name);
        }
    }

    #[test]
    fn test_find_is_case_insensitive() {
        assert_eq!(find("Hello").map(|p| p.name), Some("hello"));
        assert!(find("missing").is_none());
        assert_eq!(index_of("FOREVER"), Some(PRESETS.len() - 1));
    }
}
