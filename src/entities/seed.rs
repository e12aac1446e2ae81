//! Seeded mock datasets loaded at startup

use super::alert::{AlertKind, AlertSeverity, AlertStatus, SafetyAlert};
use super::content::{ContentItem, ContentType};
use super::provider::{Provider, ProviderKind};
use super::trek::{Difficulty, Trek, TrekStatus};
use crate::core::moderation::ModerationStatus;
use chrono::{DateTime, NaiveDate, Utc};

fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(6, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

type TrekRow = (
    &'static str,
    &'static str,
    &'static str,
    Difficulty,
    u32,
    u32,
    f64,
    u32,
    f64,
    bool,
    bool,
    TrekStatus,
    &'static [&'static str],
    &'static str,
);

const TREKS: &[TrekRow] = &[
    (
        "everest-base-camp",
        "Everest Base Camp",
        "Khumbu",
        Difficulty::Hard,
        14,
        5364,
        4.9,
        2847,
        1450.0,
        true,
        true,
        TrekStatus::Published,
        &["Spring", "Autumn"],
        "Classic route through Sherpa villages to the foot of the world's highest peak.",
    ),
    (
        "annapurna-circuit",
        "Annapurna Circuit",
        "Annapurna",
        Difficulty::Challenging,
        18,
        5416,
        4.8,
        1932,
        1250.0,
        true,
        true,
        TrekStatus::Published,
        &["Spring", "Autumn"],
        "Full loop around the Annapurna massif crossing the Thorong La pass.",
    ),
    (
        "poon-hill",
        "Ghorepani Poon Hill",
        "Annapurna",
        Difficulty::Easy,
        4,
        3210,
        4.6,
        1568,
        450.0,
        true,
        false,
        TrekStatus::Published,
        &["Spring", "Autumn", "Winter"],
        "Short rhododendron forest walk with a famous sunrise viewpoint.",
    ),
    (
        "langtang-valley",
        "Langtang Valley",
        "Langtang",
        Difficulty::Moderate,
        8,
        4984,
        4.7,
        894,
        700.0,
        true,
        false,
        TrekStatus::Published,
        &["Spring", "Autumn"],
        "Glacier valley close to Kathmandu with Tamang heritage villages.",
    ),
    (
        "manaslu-circuit",
        "Manaslu Circuit",
        "Manaslu",
        Difficulty::Hard,
        16,
        5106,
        4.8,
        612,
        1600.0,
        true,
        true,
        TrekStatus::Published,
        &["Autumn"],
        "Remote restricted-area circuit around the eighth highest mountain.",
    ),
    (
        "upper-mustang",
        "Upper Mustang",
        "Mustang",
        Difficulty::Moderate,
        12,
        3840,
        4.5,
        403,
        2200.0,
        true,
        false,
        TrekStatus::Published,
        &["Spring", "Summer", "Autumn"],
        "Desert landscapes and walled Lo Manthang in the rain shadow.",
    ),
    (
        "gokyo-lakes",
        "Gokyo Lakes",
        "Khumbu",
        Difficulty::Challenging,
        12,
        5357,
        4.7,
        1105,
        1300.0,
        true,
        false,
        TrekStatus::Published,
        &["Spring", "Autumn"],
        "Turquoise glacial lakes and the Gokyo Ri viewpoint over four 8000m peaks.",
    ),
    (
        "mardi-himal",
        "Mardi Himal",
        "Annapurna",
        Difficulty::Moderate,
        6,
        4500,
        4.6,
        377,
        550.0,
        false,
        false,
        TrekStatus::Draft,
        &["Spring", "Autumn"],
        "Ridge walk to the base of Mardi Himal under Machhapuchhre.",
    ),
    (
        "kanchenjunga-base-camp",
        "Kanchenjunga Base Camp",
        "Kanchenjunga",
        Difficulty::Hard,
        22,
        5143,
        4.9,
        148,
        2400.0,
        true,
        false,
        TrekStatus::Draft,
        &["Autumn"],
        "Long wilderness trek to both base camps of the third highest peak.",
    ),
    (
        "helambu",
        "Helambu Circuit",
        "Langtang",
        Difficulty::Easy,
        5,
        3640,
        4.3,
        221,
        400.0,
        false,
        false,
        TrekStatus::Archived,
        &["Autumn", "Winter"],
        "Gentle loop through Hyolmo villages north of the Kathmandu valley.",
    ),
];

pub fn treks() -> Vec<Trek> {
    TREKS
        .iter()
        .enumerate()
        .map(
            |(
                i,
                &(
                    id,
                    name,
                    region,
                    difficulty,
                    duration_days,
                    max_altitude_m,
                    rating,
                    reviews,
                    price_usd,
                    permit_required,
                    featured,
                    status,
                    seasons,
                    description,
                ),
            )| Trek {
                id: id.to_string(),
                name: name.to_string(),
                region: region.to_string(),
                difficulty,
                description: description.to_string(),
                duration_days,
                max_altitude_m,
                rating,
                reviews,
                price_usd,
                permit_required,
                featured,
                status,
                best_seasons: strings(seasons),
                created_at: at(2024, 1 + i as u32, 10),
                updated_at: at(2025, 1 + i as u32, 3),
            },
        )
        .collect()
}

/// Moderation queue. Every seeded submission starts out pending.
pub fn content() -> Vec<ContentItem> {
    let rows: [(&str, &str, &str, ContentType, &str, &str, u32, u32, DateTime<Utc>); 8] = [
        (
            "story-001",
            "Sunrise at Kala Patthar",
            "Maya Thapa",
            ContentType::Story,
            "Khumbu",
            "We left Gorak Shep at four in the morning and reached the top just as the light hit Everest.",
            0,
            142,
            at(2025, 9, 2),
        ),
        (
            "review-002",
            "Great teahouse in Ghorepani",
            "Liam Carter",
            ContentType::Review,
            "Annapurna",
            "Warm dining room, hot showers and the best dal bhat of the whole trek.",
            0,
            37,
            at(2025, 9, 5),
        ),
        (
            "photo-003",
            "Prayer flags over Thorong La",
            "Anjali Rai",
            ContentType::Photo,
            "Annapurna",
            "Shot at 5416m after a long climb from High Camp.",
            1,
            88,
            at(2025, 9, 8),
        ),
        (
            "question-004",
            "Permit needed for Mardi Himal?",
            "Jonas Weber",
            ContentType::Question,
            "Annapurna",
            "Do I need both ACAP and TIMS for a six day Mardi Himal trek in October?",
            0,
            4,
            at(2025, 9, 11),
        ),
        (
            "story-005",
            "Cheap guide offer, message me",
            "quicktrek99",
            ContentType::Story,
            "Khumbu",
            "Best price guaranteed, contact me directly outside the platform for discounts.",
            6,
            0,
            at(2025, 9, 12),
        ),
        (
            "review-006",
            "Langtang homestay experience",
            "Priya Nair",
            ContentType::Review,
            "Langtang",
            "Our hosts in Kyanjin Gompa cooked fresh yak cheese pancakes every morning.",
            0,
            51,
            at(2025, 9, 14),
        ),
        (
            "photo-007",
            "Lo Manthang city walls",
            "Tenzing Lama",
            ContentType::Photo,
            "Mustang",
            "Late afternoon light on the walls of the old royal capital.",
            0,
            76,
            at(2025, 9, 18),
        ),
        (
            "story-008",
            "Altitude sickness at Dingboche",
            "Emma Laurent",
            ContentType::Story,
            "Khumbu",
            "A reminder to take your acclimatization days seriously, we had to descend to Pheriche.",
            2,
            64,
            at(2025, 9, 21),
        ),
    ];

    rows.into_iter()
        .map(
            |(id, title, author, content_type, region, excerpt, reports, likes, submitted_at)| {
                ContentItem {
                    id: id.to_string(),
                    title: title.to_string(),
                    author: author.to_string(),
                    content_type,
                    region: region.to_string(),
                    excerpt: excerpt.to_string(),
                    status: ModerationStatus::Pending,
                    reports,
                    likes,
                    submitted_at,
                    moderated_at: None,
                }
            },
        )
        .collect()
}

pub fn alerts() -> Vec<SafetyAlert> {
    vec![
        SafetyAlert {
            id: "alert-001".to_string(),
            title: "Landslide near Tatopani".to_string(),
            description: "Debris blocks the trail section below Tatopani, use the jeep road detour."
                .to_string(),
            severity: AlertSeverity::High,
            kind: AlertKind::Landslide,
            affected_regions: strings(&["Annapurna"]),
            status: AlertStatus::Active,
            issued_at: at(2025, 9, 20),
            expires_at: None,
        },
        SafetyAlert {
            id: "alert-002".to_string(),
            title: "Heavy snowfall forecast above 4500m".to_string(),
            description: "Expect snow on high passes for three days, delay crossings where possible."
                .to_string(),
            severity: AlertSeverity::Critical,
            kind: AlertKind::Weather,
            affected_regions: strings(&["Khumbu", "Annapurna", "Manaslu"]),
            status: AlertStatus::Active,
            issued_at: at(2025, 10, 1),
            expires_at: None,
        },
        SafetyAlert {
            id: "alert-003".to_string(),
            title: "Water contamination in Namche".to_string(),
            description: "Treat all tap water in Namche Bazaar until the municipal supply is cleared."
                .to_string(),
            severity: AlertSeverity::Medium,
            kind: AlertKind::Health,
            affected_regions: strings(&["Khumbu"]),
            status: AlertStatus::Resolved,
            issued_at: at(2025, 8, 14),
            expires_at: Some(at(2025, 8, 30)),
        },
        SafetyAlert {
            id: "alert-004".to_string(),
            title: "Suspension bridge closed at Syabrubesi".to_string(),
            description: "Bridge under repair, trekkers are routed over the upstream crossing."
                .to_string(),
            severity: AlertSeverity::Low,
            kind: AlertKind::RouteClosure,
            affected_regions: strings(&["Langtang"]),
            status: AlertStatus::Active,
            issued_at: at(2025, 9, 27),
            expires_at: None,
        },
    ]
}

pub fn providers() -> Vec<Provider> {
    let rows: [(&str, &str, ProviderKind, &str, f64, u32, f64, bool, &[&str], &str); 6] = [
        (
            "yeti-mountain-lodge",
            "Yeti Mountain Lodge",
            ProviderKind::Hotel,
            "Khumbu",
            4.7,
            318,
            120.0,
            true,
            &["English", "Nepali"],
            "Heated rooms with attached bathrooms in Namche Bazaar.",
        ),
        (
            "hotel-snowland",
            "Hotel Snowland",
            ProviderKind::Hotel,
            "Annapurna",
            4.4,
            205,
            45.0,
            true,
            &["English", "Nepali", "Hindi"],
            "Family-run teahouse in Ghorepani with views of Dhaulagiri.",
        ),
        (
            "kyanjin-guest-house",
            "Kyanjin Guest House",
            ProviderKind::Hotel,
            "Langtang",
            4.2,
            97,
            30.0,
            false,
            &["Nepali", "Tibetan"],
            "Simple rooms next to the Kyanjin Gompa monastery.",
        ),
        (
            "pemba-dorje",
            "Pemba Dorje Sherpa",
            ProviderKind::Guide,
            "Khumbu",
            4.9,
            412,
            35.0,
            true,
            &["English", "Nepali", "Sherpa"],
            "Licensed guide with twelve Everest region seasons.",
        ),
        (
            "sabina-gurung",
            "Sabina Gurung",
            ProviderKind::Guide,
            "Annapurna",
            4.8,
            186,
            30.0,
            true,
            &["English", "Nepali", "German"],
            "Woman-led trekking guide for the Annapurna and Mardi Himal routes.",
        ),
        (
            "bikash-tamang",
            "Bikash Tamang",
            ProviderKind::Guide,
            "Langtang",
            4.5,
            64,
            25.0,
            false,
            &["English", "Nepali"],
            "Local guide born in the Langtang valley.",
        ),
    ];

    rows.into_iter()
        .enumerate()
        .map(
            |(i, (id, name, kind, region, rating, reviews, price_usd, verified, languages, description))| {
                Provider {
                    id: id.to_string(),
                    name: name.to_string(),
                    kind,
                    region: region.to_string(),
                    description: description.to_string(),
                    rating,
                    reviews,
                    price_usd,
                    verified,
                    languages: strings(languages),
                    joined_at: at(2023, 3 + i as u32, 1),
                }
            },
        )
        .collect()
}
