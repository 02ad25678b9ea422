use rand::Rng;
use serde::Serialize;

use super::types::{base_asset, Rarity, TradeMetrics};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDesign {
    pub colors: [&'static str; 2],
    pub image_url: String,
    pub animation: &'static str,
}

pub fn card_design(rarity: Rarity) -> CardDesign {
    let (colors, image) = match rarity {
        Rarity::Common => (["#95A5A6", "#7F8C8D"], "space-sweeper.jpg"),
        Rarity::Rare => (["#3498DB", "#2980B9"], "nexus-helper.jpg"),
        Rarity::Epic => (["#9B59B6", "#8E44AD"], "quantum-shift.jpg"),
        Rarity::Legendary => (["#FFD700", "#FF8C00"], "voidweaver.jpg"),
        Rarity::Mythic => (["#E74C3C", "#C0392B"], "nexus-prime.jpg"),
    };

    CardDesign {
        colors,
        image_url: format!("/images/cards/{}", image),
        animation: if rarity == Rarity::Mythic { "glow" } else { "none" },
    }
}

pub fn cosmic_rank(rarity: Rarity) -> &'static str {
    match rarity {
        Rarity::Common => "METEOR CLASS",
        Rarity::Rare => "NEBULA CLASS",
        Rarity::Epic => "SUPERNOVA CLASS",
        Rarity::Legendary => "BLACK HOLE CLASS",
        Rarity::Mythic => "GALAXY CLASS",
    }
}

pub fn cosmic_sector(asset: &str) -> &'static str {
    match asset {
        "BTC" => "QUANTUM SECTOR",
        "ETH" => "COSMIC SECTOR",
        "SOL" => "SOLAR SECTOR",
        "HYPE" => "HYPERSPACE SECTOR",
        "USDC" => "STABLE SECTOR",
        _ => "VOID SECTOR",
    }
}

fn ship_names(asset: &str) -> &'static [&'static str] {
    match asset {
        "BTC" => &["Star-Runner", "Quantum-Leaper", "Nova-Chaser", "Light-Speeder"],
        "ETH" => &["Nebula-Surfer", "Ether-Drifter", "Gas-Giant", "Void-Sailer"],
        "SOL" => &["Photon-Rider", "Solar-Sailer", "Light-Speeder", "Plasma-Cruiser"],
        "HYPE" => &["Hyper-Jumper", "Warp-Driver", "Phase-Shifter", "Speed-Demon"],
        "USDC" => &["Stable-Orbiter", "Anchor-Ship", "Balance-Keeper", "Steady-Cruiser"],
        _ => &["Cosmic-Voyager", "Space-Trader", "Orbit-Runner", "Void-Walker"],
    }
}

pub fn ship_name<R: Rng + ?Sized>(metrics: &TradeMetrics, rng: &mut R) -> String {
    let asset = metrics.asset();
    let ships = ship_names(asset);
    format!("{} {}", asset, ships[rng.random_range(0..ships.len())])
}

pub fn mission_log(metrics: &TradeMetrics) -> String {
    let roi = metrics.roi_percent;
    if roi > 100.0 {
        "Achieved superluminal returns through quantum slipstream".to_string()
    } else if roi > 50.0 {
        "Navigated supernova volatility with precision".to_string()
    } else if roi > 20.0 {
        format!(
            "Rode {} currents through asteroid field",
            metrics.direction.as_str().to_lowercase()
        )
    } else if roi > 0.0 {
        "Steady course through cosmic winds yielded gains".to_string()
    } else {
        "Encountered unexpected space turbulence".to_string()
    }
}

/// Space-themed display strings shown on the back of a card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CosmicTradeData {
    pub cosmic_rank: &'static str,
    pub ship_name: String,
    pub mission_duration: String, // "14 light-days"
    pub energy_yield: String,     // "+142.0%"
    pub stardust: String,         // "$2,850 stardust"
    pub cargo_mass: String,       // "20k megatons"
    pub mission_log: String,
    pub sector: &'static str,
}

pub fn cosmic_trade_data<R: Rng + ?Sized>(
    metrics: &TradeMetrics,
    rarity: Rarity,
    profit_usd: f64,
    rng: &mut R,
) -> CosmicTradeData {
    let plural = if metrics.hold_days != 1 { "s" } else { "" };
    let sign = if metrics.is_win() { "+" } else { "" };

    CosmicTradeData {
        cosmic_rank: cosmic_rank(rarity),
        ship_name: ship_name(metrics, rng),
        mission_duration: format!("{} light-day{}", metrics.hold_days, plural),
        energy_yield: format!("{}{:.1}%", sign, metrics.roi_percent),
        stardust: format!("${} stardust", group_thousands(profit_usd.round() as i64)),
        cargo_mass: format!("{}k megatons", (metrics.notional_usd / 1000.0).round() as i64),
        mission_log: mission_log(metrics),
        sector: cosmic_sector(base_asset(&metrics.pair)),
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if n < 0 {
        out.insert(0, '-');
    }
    out
}
