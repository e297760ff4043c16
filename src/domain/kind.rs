use std::fmt;

/// The seven entity kinds held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Track,
    Factor,
    Measurement,
    Target,
    Initiative,
    Scenario,
    Supplier,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Track => "track",
            Kind::Factor => "factor",
            Kind::Measurement => "measurement",
            Kind::Target => "target",
            Kind::Initiative => "initiative",
            Kind::Scenario => "scenario",
            Kind::Supplier => "supplier",
        }
    }

    /// Short prefix baked into generated ids, e.g. `trk-<uuid>`.
    pub fn id_prefix(self) -> &'static str {
        match self {
            Kind::Track => "trk",
            Kind::Factor => "fac",
            Kind::Measurement => "mea",
            Kind::Target => "tgt",
            Kind::Initiative => "ini",
            Kind::Scenario => "scn",
            Kind::Supplier => "sup",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
