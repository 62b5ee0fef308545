//! Keyword-based category suggestion
//!
//! Maps free-text transaction descriptions to category labels with an
//! ordered substring-rule table. The table is a versioned asset: rules are
//! data, not branching, and earlier rules win ties.

/// One categorization rule: any keyword substring match assigns the category.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub keywords: &'static [&'static str],
    pub category: &'static str,
}

/// Category callers should fall back to when no rule matches.
pub const DEFAULT_CATEGORY: &str = "Outros";

/// Ordered rule table. First match wins, so more specific or higher-traffic
/// rules come first. Keywords are lowercase; matching is case-insensitive
/// substring containment.
const RULES: &[CategoryRule] = &[
    CategoryRule {
        keywords: &[
            "uber",
            "99",
            "taxi",
            "posto",
            "gasolina",
            "combustivel",
            "estacionamento",
        ],
        category: "Transporte",
    },
    CategoryRule {
        keywords: &[
            "ifood",
            "rappi",
            "ubereats",
            "restaurante",
            "padaria",
            "mercado",
            "supermercado",
            "atacadista",
        ],
        category: "Alimentação",
    },
    CategoryRule {
        keywords: &[
            "netflix",
            "spotify",
            "amazon prime",
            "disney",
            "hbo",
            "youtube",
            "apple",
        ],
        category: "Assinaturas",
    },
    CategoryRule {
        keywords: &[
            "farmacia",
            "drogaria",
            "medico",
            "hospital",
            "laboratorio",
            "exam",
        ],
        category: "Saúde",
    },
    CategoryRule {
        keywords: &[
            "cinema",
            "show",
            "ingresso",
            "steam",
            "playstation",
            "xbox",
            "nintendo",
        ],
        category: "Lazer",
    },
    CategoryRule {
        keywords: &[
            "salario",
            "pagamento",
            "remuneracao",
            "transferencia recebida",
            "pix recebido",
        ],
        category: "Renda",
    },
    CategoryRule {
        keywords: &[
            "aluguel",
            "condominio",
            "luz",
            "agua",
            "internet",
            "claro",
            "vivo",
            "tim",
        ],
        category: "Casa",
    },
    CategoryRule {
        keywords: &["academia", "smartfit", "bluefit"],
        category: "Saúde",
    },
];

/// Suggest a category for a transaction description.
///
/// Returns `None` when no keyword matches; the caller decides the default
/// (typically [`DEFAULT_CATEGORY`]).
pub fn suggest_category(description: &str) -> Option<&'static str> {
    let desc = description.to_lowercase();

    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| desc.contains(k)))
        .map(|rule| rule.category)
}
