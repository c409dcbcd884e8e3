use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BlogPost {
    pub title: &'static str,
    pub category: &'static str,
    pub author: &'static str,
    pub date: &'static str,
    pub read_time: &'static str,
    pub excerpt: &'static str,
    pub body: &'static [&'static str],
}

const POSTS: &[BlogPost] = &[
    BlogPost {
        title: "Understanding Anxiety: A Beginner's Guide",
        category: "Mental Health",
        author: "Dr. Emily Carter",
        date: "March 2, 2026",
        read_time: "6 min read",
        excerpt: "What anxiety is, why it shows up, and the first steps toward managing it.",
        body: &[
            "Anxiety is the body's alarm system. It is meant to keep us safe, but sometimes it fires when there is no real danger.",
            "Recognising the physical signs (a racing heart, shallow breathing, tense shoulders) is the first step to calming them.",
            "Grounding exercises, regular movement and honest conversations all help. When anxiety starts to shape your days, talking to a professional is a sign of strength.",
        ],
    },
    BlogPost {
        title: "The Science of Mindfulness",
        category: "Mindfulness",
        author: "Dr. Raj Patel",
        date: "February 18, 2026",
        read_time: "8 min read",
        excerpt: "How a few minutes of attention each day changes the brain.",
        body: &[
            "Mindfulness means paying attention to the present moment on purpose and without judgement.",
            "Studies link regular practice to lower stress hormones and better emotional regulation.",
            "Start small: one minute of noticing your breath before you open your laptop in the morning.",
        ],
    },
    BlogPost {
        title: "Building Healthy Sleep Habits",
        category: "Wellness",
        author: "Maria Gonzalez, LCSW",
        date: "January 29, 2026",
        read_time: "5 min read",
        excerpt: "Sleep and mood feed each other. Here is how to get the cycle working for you.",
        body: &[
            "Poor sleep makes everything feel heavier, and a heavy mind makes sleep harder.",
            "Keep a steady wake-up time, dim the screens an hour before bed and keep the bedroom cool.",
            "If you lie awake for more than twenty minutes, get up and do something calm until you feel sleepy.",
        ],
    },
];

pub fn find(index: usize) -> Option<&'static BlogPost> {
    POSTS.get(index)
}
