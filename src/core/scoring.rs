use crate::models::UserNetwork;

/// Calculate a similarity score (0-100) between two users
///
/// Each user's network is everything they follow plus everything that
/// follows them. The score is the Jaccard similarity of the two networks:
///
/// score = round(|A ∩ B| / |A ∪ B| * 100)
///
/// Ties at .5 round up. Returns 0 when either network is missing or both
/// are empty.
pub fn similarity_score(user_a: Option<&UserNetwork>, user_b: Option<&UserNetwork>) -> u8 {
    let (Some(user_a), Some(user_b)) = (user_a, user_b) else {
        return 0;
    };

    let network_a = user_a.combined();
    let network_b = user_b.combined();

    let shared = network_a.intersection_size(&network_b);
    let union = network_a.size() + network_b.size() - shared;

    jaccard_percent(shared, union)
}

/// round(shared / union * 100) in integer arithmetic, half up
#[inline]
fn jaccard_percent(shared: usize, union: usize) -> u8 {
    if union == 0 {
        return 0;
    }

    let percent = (shared * 200 + union) / (union * 2);
    percent.min(100) as u8
}

/// Label shown alongside a similarity score
pub fn similarity_message(score: u8) -> &'static str {
    match score {
        100..=u8::MAX => "🐑 dolly!",
        30..=99 => "Practically soulmates",
        20..=29 => "People ask if we're related",
        14..=19 => "F is for Friends",
        12..=13 => "We should hangout",
        10..=11 => "We should start a club",
        7..=9 => "My friend knows your friend",
        2..=6 => "Not strangers",
        _ => "Different worlds",
    }
}
