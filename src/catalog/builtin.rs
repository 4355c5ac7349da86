// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::community::{CommunityPost, PostKind};
use super::episode::Episode;

/// Public domain sample shared by every built-in episode
pub const SAMPLE_AUDIO: &str = "https://www2.cs.uic.edu/~i101/SoundFiles/BabyElephantWalk60.wav";

struct EpisodeSeed {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    duration: &'static str,
    artwork_url: &'static str,
    publish_date: &'static str,
    tags: [&'static str; 3],
}

const EPISODES: [EpisodeSeed; 6] = [
    EpisodeSeed {
        id: "1",
        title: "THE TALKING STAGE",
        description: "Rivaldo and Ghost breakdown the absolute chaos of modern dating in Nairobi. When does \"talking\" actually mean you are together? We read your wildest DM screenshots.",
        duration: "42:10",
        artwork_url: "https://picsum.photos/id/338/600/600",
        publish_date: "OCT 12, 2023",
        tags: ["Side A", "Dating", "Chaos"],
    },
    EpisodeSeed {
        id: "2",
        title: "NAIROBI DIARIES",
        description: "From late night matatu rides to the price of rent in Kile. We discuss the survival guide for living in the city without losing your mind (or your phone).",
        duration: "35:15",
        artwork_url: "https://picsum.photos/id/349/600/600",
        publish_date: "OCT 19, 2023",
        tags: ["Mix 2", "City Life", "Culture"],
    },
    EpisodeSeed {
        id: "3",
        title: "AI & CONSPIRACIES",
        description: "That 2AM conversation where everything gets deep. Will ChatGPT steal our jobs? Are the birds real? Ghost goes down a rabbit hole you won't believe.",
        duration: "48:00",
        artwork_url: "https://picsum.photos/id/364/600/600",
        publish_date: "OCT 26, 2023",
        tags: ["Side B", "Deep Dive", "Comedy"],
    },
    EpisodeSeed {
        id: "4",
        title: "MONEY MOVES",
        description: "Hustle culture, black tax, and trying to save money while having a social life. We keep it 100 about finances and the pressure to look successful.",
        duration: "55:20",
        artwork_url: "https://picsum.photos/id/431/600/600",
        publish_date: "NOV 02, 2023",
        tags: ["Explicit", "Hustle", "Real Talk"],
    },
    EpisodeSeed {
        id: "5",
        title: "GHOSTING 101",
        description: "Why do we do it? We analyze the psychology behind disappearing acts and share personal stories of the worst times we've been ghosted.",
        duration: "39:45",
        artwork_url: "https://picsum.photos/id/534/600/600",
        publish_date: "NOV 09, 2023",
        tags: ["Side A", "Heartbreak", "Advice"],
    },
    EpisodeSeed {
        id: "6",
        title: "TUKO SAWA?",
        description: "A mental health check-in. It's okay not to be okay. We drop the jokes for a minute to talk about burnout, anxiety, and finding your peace.",
        duration: "44:10",
        artwork_url: "https://picsum.photos/id/646/600/600",
        publish_date: "NOV 16, 2023",
        tags: ["Finale", "Mental Health", "Vulnerable"],
    },
];

/// Episodes shipped with the site, in display order
pub fn episodes() -> Vec<Episode> {
    EPISODES
        .iter()
        .map(|seed| Episode {
            id: seed.id.to_string(),
            title: seed.title.to_string(),
            description: seed.description.to_string(),
            duration: seed.duration.to_string(),
            audio_url: SAMPLE_AUDIO.to_string(),
            artwork_url: seed.artwork_url.to_string(),
            publish_date: seed.publish_date.to_string(),
            tags: seed.tags.iter().map(|tag| tag.to_string()).collect(),
        })
        .collect()
}

/// Posts pinned to the community board
pub fn community_posts() -> Vec<CommunityPost> {
    let post = |id: &str, author: &str, content: &str, kind: PostKind, rotation: &str, color: &str| {
        CommunityPost {
            id: id.to_string(),
            author: author.to_string(),
            content: content.to_string(),
            kind,
            rotation: Some(rotation.to_string()),
            color: Some(color.to_string()),
        }
    };

    vec![
        post(
            "p1",
            "@nairobi_gurl",
            "These guys talk like my inner monologue. It's scary how accurate the dating episode was.",
            PostKind::Tweet,
            "-rotate-2",
            "bg-tuko-cream",
        ),
        post(
            "p2",
            "Anonymous DM",
            "Episode 4 saved me from buying a car I couldn't afford. Tuko Sawa for real.",
            PostKind::Dm,
            "rotate-3",
            "bg-white",
        ),
        post(
            "p3",
            "@vinyl_junkie",
            "The audio production is crazy good. Gives me old school radio vibes.",
            PostKind::Comment,
            "-rotate-1",
            "bg-tuko-yellow",
        ),
        post(
            "p4",
            "Sarah K.",
            "Ghost needs his own stand-up special. The AI theory had me dying!",
            PostKind::Comment,
            "rotate-2",
            "bg-purple-200",
        ),
        post(
            "p5",
            "@city_walker",
            "Finally a podcast that doesn't feel scripted. Just raw vibes.",
            PostKind::Tweet,
            "-rotate-3",
            "bg-blue-100",
        ),
    ]
}
