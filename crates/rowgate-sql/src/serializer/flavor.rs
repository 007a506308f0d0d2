use super::Serializer;

#[derive(Debug)]
pub(super) enum Flavor {
    Ansi,
    Mysql,
}

impl Flavor {
    pub(super) fn identifier_quote(&self) -> &'static str {
        match self {
            Flavor::Ansi => "\"",
            Flavor::Mysql => "`",
        }
    }
}

impl Serializer {
    pub fn ansi() -> Serializer {
        Serializer {
            flavor: Flavor::Ansi,
        }
    }

    pub fn mysql() -> Serializer {
        Serializer {
            flavor: Flavor::Mysql,
        }
    }
}
