/// A tracked Solana DeFi protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProtocolDescriptor {
    pub name: &'static str,
    /// DefiLlama protocol slug
    pub slug: &'static str,
}

/// Protocols covered by the dashboard, in display order
pub const SOLANA_PROTOCOLS: [ProtocolDescriptor; 5] = [
    ProtocolDescriptor { name: "Raydium", slug: "raydium" },
    ProtocolDescriptor { name: "Orca", slug: "orca" },
    ProtocolDescriptor { name: "Jupiter", slug: "jupiter" },
    ProtocolDescriptor { name: "Marinade", slug: "marinade" },
    ProtocolDescriptor { name: "Drift", slug: "drift" },
];

/// Look up a tracked protocol by slug
pub fn find_by_slug(slug: &str) -> Option<&'static ProtocolDescriptor> {
    SOLANA_PROTOCOLS.iter().find(|p| p.slug == slug)
}
