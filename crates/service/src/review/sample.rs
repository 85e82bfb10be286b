//! Starter catalogue of royalty-free music reviews used to seed the in-memory store.

use crate::review::domain::ReviewInput;

const CATALOGUE: [(&str, &str, &str, i32, &str); 10] = [
    (
        "Dreams",
        "Benjamin Tissot",
        "Jane Doe",
        4,
        "\"Dreams\" is a relaxing, chill-out track perfect for unwinding after a long day. The laid-back mood and calming melodies are a hit!",
    ),
    (
        "Slow Life",
        "Benjamin Lazzarus",
        "John Smith",
        4,
        "\"Slow Life\" offers an intriguing blend of epic royalty-free music, featuring piano and strings for a serene atmosphere. Perfect for videos!",
    ),
    (
        "Fireside Chat",
        "Yunior Arronte",
        "Alice Johnson",
        4,
        "\"Fireside Chat\" has a warm, jazzy vibe with soothing instruments that create the perfect backdrop for a cozy evening. Highly recommended!",
    ),
    (
        "Dawn of Change",
        "Roman Senyk",
        "Mark Wilson",
        3,
        "\"Dawn of Change\" brings emotional cinematic royalty-free music with strings and percussion that evoke powerful feelings of transformation.",
    ),
    (
        "Hope",
        "Hugo Dujardin",
        "Sarah Clark",
        4,
        "\"Hope\" is a beautiful, touching piano track that will resonate with anyone who enjoys calming piano solos. It's short but very sweet.",
    ),
    (
        "Yesterday",
        "Aventure",
        "Chris Thompson",
        5,
        "\"Yesterday\" is a standout! The relaxing synths and drums make it a great choice for unwinding and creating a serene atmosphere. A must-listen.",
    ),
    (
        "Hearty",
        "Aventure",
        "Rachel Evans",
        3,
        "\"Hearty\" has a touching, soft feel, with relaxing synths and drums that fit perfectly for emotional scenes. Aventure delivers again.",
    ),
    (
        "Floating Garden",
        "Aventure",
        "Michael Brown",
        4,
        "\"Floating Garden\" is a dreamy lo-fi track that features bass and electric guitar. Its mellow vibes are perfect for chilling out.",
    ),
    (
        "Angels By My Side",
        "Lunar Years",
        "Laura Green",
        4,
        "\"Angels By My Side\" is a beautiful, touching folk track featuring acoustic guitar and heartfelt melodies. It's a deeply emotional song.",
    ),
    (
        "Moonlight Drive",
        "Yunior Arronte",
        "Tom Harris",
        5,
        "\"Moonlight Drive\" is a slow, lo-fi relaxing track with calming piano, synth, drums, and bass. Perfect for a late-night drive or chill session.",
    ),
];

pub fn catalogue() -> Vec<ReviewInput> {
    CATALOGUE
        .iter()
        .map(|&(title, artist, reviewer, rating, review)| ReviewInput {
            title: title.into(),
            artist: artist.into(),
            reviewer: reviewer.into(),
            rating,
            review: review.into(),
            picture: None,
            date: None,
        })
        .collect()
}
