//! # Use Cases
//!
//! One struct per pipeline operation, each with a single `execute` method that
//! forwards to its repository. State holders depend on these rather than on the
//! repositories, which keeps every screen's surface to exactly the operations
//! it uses.

mod macros;

use std::sync::Arc;

use macros::define_use_case;

use crate::model::{
    LoginRequest, Member, NewPost, NewsPage, PhotoUpload, Post, Profile, ProfileUpdate,
    RegisterRequest, SearchQuery, Settings, UploadedPhoto, User, VersionStatus,
};
use crate::repository::{
    AppRepository, AuthRepository, NewsRepository, PostRepository, ProfileRepository,
    SearchRepository, SettingsRepository,
};

define_use_case! {
    /// Creates an account and signs it in.
    Register => AuthRepository::register(request: RegisterRequest) -> User
}

define_use_case! {
    Login => AuthRepository::login(request: LoginRequest) -> User
}

define_use_case! {
    Logout => AuthRepository::logout() -> ()
}

define_use_case! {
    /// Cached profile first, then the server copy.
    FetchProfile => ProfileRepository::fetch_profile() -> Profile
}

define_use_case! {
    UpdateProfile => ProfileRepository::update_profile(update: ProfileUpdate) -> Profile
}

define_use_case! {
    UploadPhoto => ProfileRepository::upload_photo(photo: PhotoUpload) -> UploadedPhoto
}

define_use_case! {
    FetchNews => NewsRepository::fetch_news(page: u32) -> NewsPage
}

define_use_case! {
    CreatePost => PostRepository::create_post(post: NewPost) -> Post
}

define_use_case! {
    ListPosts => PostRepository::list_posts(page: u32) -> Vec<Post>
}

define_use_case! {
    SearchMembers => SearchRepository::search_members(query: SearchQuery) -> Vec<Member>
}

define_use_case! {
    GetSettings => SettingsRepository::get_settings() -> Settings
}

define_use_case! {
    UpdateSettings => SettingsRepository::update_settings(settings: Settings) -> Settings
}

define_use_case! {
    /// Classifies the running build against the published release.
    CheckAppVersion => AppRepository::check_app_version(current: String) -> VersionStatus
}

/// Every use case, built from one set of repositories.
#[derive(Clone)]
pub struct UseCases {
    pub register: RegisterUseCase,
    pub login: LoginUseCase,
    pub logout: LogoutUseCase,
    pub fetch_profile: FetchProfileUseCase,
    pub update_profile: UpdateProfileUseCase,
    pub upload_photo: UploadPhotoUseCase,
    pub fetch_news: FetchNewsUseCase,
    pub create_post: CreatePostUseCase,
    pub list_posts: ListPostsUseCase,
    pub search_members: SearchMembersUseCase,
    pub get_settings: GetSettingsUseCase,
    pub update_settings: UpdateSettingsUseCase,
    pub check_app_version: CheckAppVersionUseCase,
}

/// Repository handles consumed by [`UseCases::new`].
pub struct Repositories {
    pub auth: Arc<dyn AuthRepository>,
    pub profile: Arc<dyn ProfileRepository>,
    pub news: Arc<dyn NewsRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub search: Arc<dyn SearchRepository>,
    pub settings: Arc<dyn SettingsRepository>,
    pub app: Arc<dyn AppRepository>,
}

impl UseCases {
    pub fn new(repositories: Repositories) -> Self {
        let Repositories {
            auth,
            profile,
            news,
            posts,
            search,
            settings,
            app,
        } = repositories;

        Self {
            register: RegisterUseCase::new(auth.clone()),
            login: LoginUseCase::new(auth.clone()),
            logout: LogoutUseCase::new(auth),
            fetch_profile: FetchProfileUseCase::new(profile.clone()),
            update_profile: UpdateProfileUseCase::new(profile.clone()),
            upload_photo: UploadPhotoUseCase::new(profile),
            fetch_news: FetchNewsUseCase::new(news),
            create_post: CreatePostUseCase::new(posts.clone()),
            list_posts: ListPostsUseCase::new(posts),
            search_members: SearchMembersUseCase::new(search),
            get_settings: GetSettingsUseCase::new(settings.clone()),
            update_settings: UpdateSettingsUseCase::new(settings),
            check_app_version: CheckAppVersionUseCase::new(app),
        }
    }
}
