//! Test data generation and store setup/teardown shared by the HTTP tests.
//!
//! Every helper takes the store handle explicitly so tests never share state.

#![allow(dead_code)]

use chrono::{Duration, Utc};
use rand::Rng;
use rand::seq::SliceRandom;

use blogpost_core::domain::BlogPost;
use blogpost_core::ports::BlogPostRepository;
use blogpost_shared::dto::{AuthorRequest, CreatePostRequest};

pub const SEED_COUNT: usize = 10;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Claude", "Donald", "Edsger", "Frances", "Grace", "Hedy", "John",
    "Katherine", "Linus", "Margaret", "Niklaus", "Radia", "Tim",
];

const LAST_NAMES: &[&str] = &[
    "Allen", "Berners-Lee", "Dijkstra", "Hamilton", "Hopper", "Johnson", "Knuth", "Lamarr",
    "Liskov", "Lovelace", "McCarthy", "Perlman", "Shannon", "Torvalds", "Turing", "Wirth",
];

const LOREM: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
];

fn words(rng: &mut impl Rng, count: usize) -> String {
    (0..count)
        .filter_map(|_| LOREM.choose(rng).copied())
        .collect::<Vec<_>>()
        .join(" ")
}

fn paragraph(rng: &mut impl Rng) -> String {
    let sentences = rng.gen_range(3..=6);
    (0..sentences)
        .map(|_| {
            let len = rng.gen_range(5..=12);
            let sentence = words(rng, len);
            let mut chars = sentence.chars();
            match chars.next() {
                Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn generate_author() -> AuthorRequest {
    let mut rng = rand::thread_rng();
    AuthorRequest {
        first_name: FIRST_NAMES.choose(&mut rng).unwrap().to_string(),
        last_name: LAST_NAMES.choose(&mut rng).unwrap().to_string(),
    }
}

/// A random create request, `created` somewhere in the last day.
pub fn generate_blog_data() -> CreatePostRequest {
    let mut rng = rand::thread_rng();
    let title_len = rng.gen_range(2..=5);
    let created = Utc::now() - Duration::seconds(rng.gen_range(0..86_400));

    CreatePostRequest {
        author: generate_author(),
        title: words(&mut rng, title_len),
        content: paragraph(&mut rng),
        created: Some(created),
    }
}

pub fn generate_blog_post() -> BlogPost {
    BlogPost::try_from(generate_blog_data()).expect("generated data is valid")
}

/// Insert `SEED_COUNT` generated posts and return them.
pub async fn seed_blog_data(store: &dyn BlogPostRepository) -> Vec<BlogPost> {
    let posts: Vec<BlogPost> = (0..SEED_COUNT).map(|_| generate_blog_post()).collect();
    let inserted = store
        .insert_many(posts.clone())
        .await
        .expect("seeding blog data");
    assert_eq!(inserted, SEED_COUNT as u64);
    posts
}

/// Remove every post from the store.
pub async fn tear_down_db(store: &dyn BlogPostRepository) {
    store.delete_all().await.expect("tearing down blog data");
}
