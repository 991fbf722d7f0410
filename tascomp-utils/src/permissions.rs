use std::future::IntoFuture;

use twilight_http::Client;
use twilight_model::{
    guild::{Permissions, Role},
    id::{
        Id,
        marker::{GuildMarker, RoleMarker, UserMarker},
    },
};
use twilight_util::permission_calculator::PermissionCalculator;

/// The parts of a guild role the permission helpers look at.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MemberRole {
    pub id: Id<RoleMarker>,
    pub name: String,
    pub permissions: Permissions,
}

impl From<&Role> for MemberRole {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id,
            name: role.name.clone(),
            permissions: role.permissions,
        }
    }
}

/// A guild member with its roles looked up against the guild role list.
#[derive(Clone, Debug)]
pub struct ResolvedMember {
    pub guild_id: Id<GuildMarker>,
    pub user_id: Id<UserMarker>,
    pub is_owner: bool,
    /// Permissions of the guild's `@everyone` role.
    pub everyone: Permissions,
    /// The member's roles, `@everyone` excluded.
    pub roles: Vec<MemberRole>,
}

impl ResolvedMember {
    /// Resolve a member from its role ids and the guild's full role list.
    ///
    /// Role ids that no longer exist in the guild are ignored.
    pub fn from_parts(
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        owner_id: Option<Id<UserMarker>>,
        member_role_ids: &[Id<RoleMarker>],
        guild_roles: &[MemberRole],
    ) -> Self {
        let everyone_role_id: Id<RoleMarker> = guild_id.cast();

        let everyone = guild_roles
            .iter()
            .find(|role| role.id == everyone_role_id)
            .map_or_else(Permissions::empty, |role| role.permissions);

        let roles = member_role_ids
            .iter()
            .filter(|role_id| **role_id != everyone_role_id)
            .filter_map(|role_id| guild_roles.iter().find(|role| role.id == *role_id))
            .cloned()
            .collect();

        Self {
            guild_id,
            user_id,
            is_owner: owner_id == Some(user_id),
            everyone,
            roles,
        }
    }

    /// Fetch the member, the guild roles and the guild owner over HTTP.
    pub async fn fetch(
        http: &Client,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
    ) -> anyhow::Result<Self> {
        let (member, roles, guild) = tokio::join!(
            http.guild_member(guild_id, user_id).into_future(),
            http.roles(guild_id).into_future(),
            http.guild(guild_id).into_future(),
        );

        let member = member?.model().await?;
        let roles = roles?.models().await?;
        let guild = guild?.model().await?;

        let guild_roles: Vec<MemberRole> = roles.iter().map(MemberRole::from).collect();

        Ok(Self::from_parts(
            guild_id,
            user_id,
            Some(guild.owner_id),
            &member.roles,
            &guild_roles,
        ))
    }

    /// Guild-level permissions of the member.
    ///
    /// The guild owner holds every permission.
    pub fn permissions(&self) -> Permissions {
        if self.is_owner {
            return Permissions::all();
        }

        let member_roles: Vec<(Id<RoleMarker>, Permissions)> = self
            .roles
            .iter()
            .map(|role| (role.id, role.permissions))
            .collect();

        PermissionCalculator::new(self.guild_id, self.user_id, self.everyone, &member_roles).root()
    }

    pub fn has_permission(&self, required: Permissions) -> bool {
        self.permissions().contains(required)
    }
}

/// Whether the member holds a role named like any of `names`, ignoring case.
pub fn has_role<S: AsRef<str>>(member: &ResolvedMember, names: &[S]) -> bool {
    names.iter().any(|name| {
        member
            .roles
            .iter()
            .any(|role| names_match(&role.name, name.as_ref()))
    })
}

/// MANAGE_MESSAGES
pub fn has_edit_perms(member: &ResolvedMember) -> bool {
    member.has_permission(Permissions::MANAGE_MESSAGES)
}

/// ADMINISTRATOR
pub fn has_admin_perms(member: &ResolvedMember) -> bool {
    member.has_permission(Permissions::ADMINISTRATOR)
}

/// MANAGE_WEBHOOKS
pub fn has_integration_perms(member: &ResolvedMember) -> bool {
    member.has_permission(Permissions::MANAGE_WEBHOOKS)
}

fn names_match(left: &str, right: &str) -> bool {
    left.chars().count() == right.chars().count()
        && left
            .chars()
            .zip(right.chars())
            .all(|(left, right)| chars_match(left, right))
}

/// Two chars are equal ignoring case when their upper-case forms match, or
/// failing that their lower-case forms do (final sigma, Georgian, ...).
fn chars_match(left: char, right: char) -> bool {
    left == right
        || left.to_uppercase().eq(right.to_uppercase())
        || left.to_lowercase().eq(right.to_lowercase())
}
