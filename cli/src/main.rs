use clap::{Parser, Subcommand};
use elimu::error::{AppResult, run_with_error_handler};
use elimu::model::entity::{
    Badge,
    BadgeCreate,
    Choice,
    ChoiceCreate,
    Course,
    CourseCreate,
    Question,
    QuestionCreate,
    Quiz,
    QuizCreate,
    QuizLevel,
    Subject,
    SubjectCreate,
};
use elimu::model::{CatalogManager, CrudRepository, DatabaseError, DbConnection};

#[derive(Parser, Debug)]
#[command(about = "CLI tool for filling the Elimu catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register instructor ids from the profiles subsystem
    Instructor {
        #[command(subcommand)]
        action: InstructorCommands,
    },

    /// Manage subjects
    Subject {
        #[command(subcommand)]
        action: SubjectCommands,
    },

    /// Manage courses
    Course {
        #[command(subcommand)]
        action: CourseCommands,
    },

    /// Manage quizzes
    Quiz {
        #[command(subcommand)]
        action: QuizCommands,
    },

    /// Manage questions
    Question {
        #[command(subcommand)]
        action: QuestionCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum InstructorCommands {
    Register {
        /// Identity id from the profiles subsystem; generated when omitted
        #[arg(long)]
        id: Option<uuid::Uuid>,
    },
}

#[derive(Subcommand, Debug)]
pub enum SubjectCommands {
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        slug: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum CourseCommands {
    Add {
        /// Subject slug to attach the course to
        #[arg(long)]
        subject_slug: String,
        #[arg(long)]
        instructor_id: uuid::Uuid,
        #[arg(long)]
        title: String,
        #[arg(long)]
        slug: String,
        #[arg(long)]
        overview: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum QuizCommands {
    Add {
        /// Subject slug to attach the quiz to
        #[arg(long)]
        subject_slug: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        slug: String,
        #[arg(long, default_value = "1")]
        level: QuizLevel,
        #[arg(long, default_value_t = false)]
        single_attempt: bool,
        #[arg(long, default_value_t = 0)]
        pass_mark: i16,
    },
    AddBadge {
        /// Quiz slug to attach the badge to
        #[arg(long)]
        quiz_slug: String,
        /// Path of the badge image in the file store
        #[arg(long)]
        image: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum QuestionCommands {
    Add {
        #[arg(long)]
        question: String,
    },
    AddChoice {
        /// Question text to attach the choice to
        #[arg(long)]
        question: String,
        #[arg(long)]
        choice: String,
        #[arg(long)]
        position: i32,
    },
}

#[tokio::main]
async fn main() {
    run_with_error_handler(run).await;
}

async fn run() -> AppResult<()> {
    let _ = dotenvy::dotenv();
    elimu::setup_trace();
    let args = Cli::parse();

    // DATABASE_URL wins for ad-hoc seeding; otherwise go through the regular
    // config + migrations bootstrap.
    let mm = match std::env::var("DATABASE_URL") {
        Ok(uri) => CatalogManager::new(DbConnection::connect(&uri)?),
        Err(_) => elimu::build_catalog().await?,
    };

    match args.command {
        Commands::Instructor { action } => match action {
            InstructorCommands::Register { id } => {
                let id = id.unwrap_or_else(uuid::Uuid::new_v4);
                sqlx::query("INSERT INTO instructors (id) VALUES ($1)")
                    .bind(id)
                    .execute(mm.executor())
                    .await
                    .map_err(DatabaseError::from)?;
                println!("Instructor registered: {}", id);
            }
        },

        Commands::Subject { action } => match action {
            SubjectCommands::Add { title, slug } => {
                let subject = Subject::create(&mm, SubjectCreate { title, slug }).await?;
                println!("Subject created: {:?}", subject);
            }
        },

        Commands::Course { action } => match action {
            CourseCommands::Add { subject_slug, instructor_id, title, slug, overview } => {
                let subject_id: uuid::Uuid = sqlx::query_scalar("SELECT id FROM subjects WHERE slug = $1")
                    .bind(&subject_slug)
                    .fetch_one(mm.executor())
                    .await
                    .map_err(DatabaseError::from)?;

                let course = Course::create(
                    &mm,
                    CourseCreate {
                        instructor_id,
                        subject_id,
                        title,
                        slug,
                        overview,
                    },
                )
                .await?;
                println!("Course created: {:?}", course);
            }
        },

        Commands::Quiz { action } => match action {
            QuizCommands::Add { subject_slug, title, slug, level, single_attempt, pass_mark } => {
                let subject_id: uuid::Uuid = sqlx::query_scalar("SELECT id FROM subjects WHERE slug = $1")
                    .bind(&subject_slug)
                    .fetch_one(mm.executor())
                    .await
                    .map_err(DatabaseError::from)?;

                let quiz = Quiz::create(
                    &mm,
                    QuizCreate {
                        subject_id,
                        level,
                        title,
                        slug,
                        single_attempt: Some(single_attempt),
                        pass_mark: Some(pass_mark),
                    },
                )
                .await?;
                println!("Quiz created: {:?}", quiz);
            }

            QuizCommands::AddBadge { quiz_slug, image } => {
                let quiz_id: uuid::Uuid = sqlx::query_scalar("SELECT id FROM quizzes WHERE slug = $1")
                    .bind(&quiz_slug)
                    .fetch_one(mm.executor())
                    .await
                    .map_err(DatabaseError::from)?;

                let badge = Badge::create(&mm, BadgeCreate { quiz_id, image }).await?;
                println!("Badge created: {:?}", badge);
            }
        },

        Commands::Question { action } => match action {
            QuestionCommands::Add { question } => {
                let question = Question::create(&mm, QuestionCreate { question }).await?;
                println!("Question created: {:?}", question);
            }

            QuestionCommands::AddChoice { question, choice, position } => {
                let question_id: uuid::Uuid = sqlx::query_scalar("SELECT id FROM questions WHERE question = $1")
                    .bind(&question)
                    .fetch_one(mm.executor())
                    .await
                    .map_err(DatabaseError::from)?;

                let choice = Choice::create(
                    &mm,
                    ChoiceCreate {
                        question_id,
                        choice,
                        position,
                    },
                )
                .await?;
                println!("Choice created: {:?}", choice);
            }
        },
    }

    Ok(())
}
