use super::Permission;

#[derive(Debug, Clone, Default)]
pub struct CreateUserDto {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub permissions: Vec<Permission>,
}
