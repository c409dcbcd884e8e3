use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ForumPost {
    pub author: &'static str,
    /// Single letter shown in the avatar bubble.
    pub avatar: &'static str,
    pub title: &'static str,
    pub content: &'static str,
    pub time: &'static str,
    pub replies: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Reply {
    pub author: &'static str,
    pub avatar: &'static str,
    pub content: &'static str,
    pub time: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ForumCategory {
    pub name: &'static str,
    pub description: &'static str,
    pub posts: &'static [ForumPost],
}

const ANXIETY: &[ForumPost] = &[
    ForumPost {
        author: "Sarah M.",
        avatar: "S",
        title: "Breathing techniques that actually helped me",
        content: "After months of panic attacks I started box breathing: four counts in, hold for four, four out, hold for four. It does not fix everything, but it gives me something to hold on to when my chest gets tight.",
        time: "2 hours ago",
        replies: 12,
    },
    ForumPost {
        author: "James K.",
        avatar: "J",
        title: "Work anxiety on Sunday evenings",
        content: "Every Sunday around 6pm the dread sets in. Does anyone else get this? What do you do to keep the weekend feeling like a weekend?",
        time: "5 hours ago",
        replies: 8,
    },
    ForumPost {
        author: "Priya R.",
        avatar: "P",
        title: "First therapy session next week",
        content: "I finally booked an appointment. I am nervous about not knowing what to say. Any advice for a first session?",
        time: "1 day ago",
        replies: 21,
    },
];

const DEPRESSION: &[ForumPost] = &[
    ForumPost {
        author: "Michael T.",
        avatar: "M",
        title: "Small wins thread",
        content: "Post one thing you managed today, however small. I made my bed and went for a ten minute walk.",
        time: "3 hours ago",
        replies: 34,
    },
    ForumPost {
        author: "Elena V.",
        avatar: "E",
        title: "Telling family what I am going through",
        content: "I have kept this to myself for a long time. How did you start the conversation with the people closest to you?",
        time: "1 day ago",
        replies: 15,
    },
];

const MINDFULNESS: &[ForumPost] = &[
    ForumPost {
        author: "David L.",
        avatar: "D",
        title: "30 days of meditation: what changed",
        content: "I committed to ten minutes every morning for a month. Sleep improved first, then my patience at work. Sharing my routine below.",
        time: "6 hours ago",
        replies: 19,
    },
    ForumPost {
        author: "Aiko N.",
        avatar: "A",
        title: "Favourite guided body scans?",
        content: "Looking for recommendations for body scan recordings between fifteen and twenty minutes long.",
        time: "2 days ago",
        replies: 7,
    },
];

const RELATIONSHIPS: &[ForumPost] = &[
    ForumPost {
        author: "Chris B.",
        avatar: "C",
        title: "Setting boundaries without guilt",
        content: "I always say yes and end up exhausted. How do you say no to friends without feeling like a bad person?",
        time: "4 hours ago",
        replies: 11,
    },
    ForumPost {
        author: "Noor H.",
        avatar: "N",
        title: "Loneliness after moving cities",
        content: "Moved for work three months ago and still do not know anyone. What helped you build a new circle?",
        time: "3 days ago",
        replies: 26,
    },
];

const CATEGORIES: &[ForumCategory] = &[
    ForumCategory {
        name: "Anxiety Support",
        description: "Share coping strategies and support each other",
        posts: ANXIETY,
    },
    ForumCategory {
        name: "Depression Support",
        description: "A safe space for the hard days and the better ones",
        posts: DEPRESSION,
    },
    ForumCategory {
        name: "Mindfulness & Meditation",
        description: "Practices, routines and resources for staying present",
        posts: MINDFULNESS,
    },
    ForumCategory {
        name: "Relationships",
        description: "Family, friends, partners and everything in between",
        posts: RELATIONSHIPS,
    },
];

/// Illustrative replies shown under every discussion.
const SAMPLE_REPLIES: &[Reply] = &[
    Reply {
        author: "Community Moderator",
        avatar: "M",
        content: "Thank you for sharing this. You are not alone, and it takes courage to post.",
        time: "1 hour ago",
    },
    Reply {
        author: "Lena S.",
        avatar: "L",
        content: "I went through something very similar last year. What helped me most was talking it through with someone I trust.",
        time: "45 minutes ago",
    },
    Reply {
        author: "Omar F.",
        avatar: "O",
        content: "Sending support. Take it one day at a time.",
        time: "20 minutes ago",
    },
];

pub fn find_category(name: &str) -> Option<&'static ForumCategory> {
    CATEGORIES.iter().find(|c| c.name == name)
}

pub fn find_post(category: &str, index: usize) -> Option<&'static ForumPost> {
    find_category(category).and_then(|c| c.posts.get(index))
}

pub fn sample_replies() -> &'static [Reply] {
    SAMPLE_REPLIES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_posts() {
        for c in CATEGORIES {
            assert!(!c.posts.is_empty(), "{} is empty", c.name);
        }
    }

    #[test]
    fn test_avatar_is_first_letter_of_author() {
        for c in CATEGORIES {
            for p in c.posts {
                assert!(p.author.starts_with(p.avatar), "{} / {}", p.author, p.avatar);
            }
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(find_post("Anxiety Support", 1).unwrap().author, "James K.");
        assert!(find_post("Anxiety Support", 99).is_none());
        assert!(find_category("Gardening").is_none());
    }
}
