use std::sync::Arc;

use streakboard_domain::completion::{CompletionEvent, CompletionRepository};
use streakboard_domain::habit::HabitRepository;
use streakboard_domain::shared::{DomainError, UserId};
use streakboard_domain::streak::StreakCalculator;
use streakboard_infrastructure::persistence::repositories::{
    SqliteCompletionRepository, SqliteHabitRepository,
};

mod test_helpers;

#[tokio::test]
async fn completion_repo_save_and_list_by_user() {
    let pool = Arc::new(test_helpers::setup_in_memory_db().await);
    let habits = SqliteHabitRepository::new(pool.clone());
    let completions = SqliteCompletionRepository::new(pool.clone());

    let user = UserId::from_string("user-1");
    let water = test_helpers::new_habit(&user, "Drink Water");
    habits.save(&water).await.unwrap();

    // Saved out of order; listing comes back oldest first
    for day in [3, 1, 2] {
        let event = CompletionEvent::new(water.id().clone(), user.clone(), test_helpers::at(day, 8));
        completions.save(&event).await.expect("Save completion");
    }

    let listed = completions.find_by_user(&user).await.expect("List completions");

    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0].completed_at(), test_helpers::at(1, 8));
    assert_eq!(listed[2].completed_at(), test_helpers::at(3, 8));

    let streak = StreakCalculator::compute_streak(water.id(), &listed);
    assert_eq!(streak.current_streak, 3);
    assert_eq!(streak.best_streak, 3);
    assert_eq!(streak.total_completions, 3);
}

#[tokio::test]
async fn completion_repo_find_by_user_since() {
    let pool = Arc::new(test_helpers::setup_in_memory_db().await);
    let habits = SqliteHabitRepository::new(pool.clone());
    let completions = SqliteCompletionRepository::new(pool.clone());

    let user = UserId::new();
    let read = test_helpers::new_habit(&user, "Read");
    habits.save(&read).await.unwrap();

    for (day, hour) in [(1, 23), (2, 0), (2, 18)] {
        let event = CompletionEvent::new(read.id().clone(), user.clone(), test_helpers::at(day, hour));
        completions.save(&event).await.unwrap();
    }

    let since = completions
        .find_by_user_since(&user, test_helpers::at(2, 0))
        .await
        .expect("List since");

    assert_eq!(since.len(), 2);
    assert!(since.iter().all(|c| c.completed_at() >= test_helpers::at(2, 0)));
}

#[tokio::test]
async fn completion_repo_isolates_users_and_habits() {
    let pool = Arc::new(test_helpers::setup_in_memory_db().await);
    let habits = SqliteHabitRepository::new(pool.clone());
    let completions = SqliteCompletionRepository::new(pool.clone());

    let alice = UserId::from_string("alice");
    let bob = UserId::from_string("bob");
    let run = test_helpers::new_habit(&alice, "Run");
    let swim = test_helpers::new_habit(&bob, "Swim");
    habits.save(&run).await.unwrap();
    habits.save(&swim).await.unwrap();

    completions
        .save(&CompletionEvent::new(run.id().clone(), alice.clone(), test_helpers::at(1, 9)))
        .await
        .unwrap();
    completions
        .save(&CompletionEvent::new(swim.id().clone(), bob.clone(), test_helpers::at(1, 9)))
        .await
        .unwrap();

    assert_eq!(completions.find_by_user(&alice).await.unwrap().len(), 1);
    assert_eq!(completions.find_by_habit(swim.id()).await.unwrap().len(), 1);
    assert_eq!(
        completions.find_by_habit(run.id()).await.unwrap()[0].user_id(),
        &alice
    );
}

#[tokio::test]
async fn deleting_habit_cascades_to_completions() {
    let pool = Arc::new(test_helpers::setup_in_memory_db().await);
    let habits = SqliteHabitRepository::new(pool.clone());
    let completions = SqliteCompletionRepository::new(pool.clone());

    let user = UserId::new();
    let habit = test_helpers::new_habit(&user, "Meditate");
    habits.save(&habit).await.unwrap();
    completions
        .save(&CompletionEvent::new(habit.id().clone(), user.clone(), test_helpers::at(1, 6)))
        .await
        .unwrap();

    habits.delete(habit.id()).await.unwrap();

    assert!(completions.find_by_habit(habit.id()).await.unwrap().is_empty());
}

#[tokio::test]
async fn completion_for_unknown_habit_is_rejected() {
    let pool = Arc::new(test_helpers::setup_in_memory_db().await);
    let completions = SqliteCompletionRepository::new(pool);

    let orphan = CompletionEvent::new(
        streakboard_domain::shared::HabitId::from_string("ghost"),
        UserId::new(),
        test_helpers::at(1, 6),
    );

    let result = completions.save(&orphan).await;

    assert!(matches!(result, Err(DomainError::Repository(_))));
}

#[tokio::test]
async fn completion_repo_delete_by_habit() {
    let pool = Arc::new(test_helpers::setup_in_memory_db().await);
    let habits = SqliteHabitRepository::new(pool.clone());
    let completions = SqliteCompletionRepository::new(pool.clone());

    let user = UserId::new();
    let habit = test_helpers::new_habit(&user, "Walk");
    habits.save(&habit).await.unwrap();
    for day in 1..=3 {
        completions
            .save(&CompletionEvent::new(habit.id().clone(), user.clone(), test_helpers::at(day, 6)))
            .await
            .unwrap();
    }

    completions.delete_by_habit(habit.id()).await.expect("Delete completions");

    assert!(completions.find_by_user(&user).await.unwrap().is_empty());
    assert!(habits.find_by_id(habit.id()).await.unwrap().is_some());
}
