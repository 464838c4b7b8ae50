//! Application use cases: the record store and the sample seeder.

mod post;
mod seed;
mod user;

pub use post::{
    post_create, post_delete, post_get, post_get_with_author, post_list, post_list_by_user,
    post_list_with_author_names, post_update, PostCreateReq, PostDto, PostUpdateReq,
    PostWithAuthorDto, UserPostsDto, FALLBACK_USER_LABEL, UNKNOWN_AUTHOR,
};
pub use seed::{seed_sample_data, SeedReport, SAMPLE_POSTS, SAMPLE_USERS};
pub use user::{
    user_create, user_delete, user_get, user_id_by_name, user_list, user_names, user_update,
    UserCreateReq, UserDto, UserUpdateReq,
};
