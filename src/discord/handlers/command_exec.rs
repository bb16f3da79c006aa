// Prefix command execution - the dispatch table for parsed commands.
//
// Mention resolution and permission checks happen here; the reason text was
// already extracted by the core parser.

use crate::core::commands::{help_text, Command};
use crate::discord::{Data, Error};
use poise::serenity_prelude as serenity;
use poise::serenity_prelude::Mentionable;

pub async fn execute(
    ctx: &serenity::Context,
    msg: &serenity::Message,
    data: &Data,
    command: Command,
) -> Result<(), Error> {
    match command {
        Command::Warn { reason } => warn(ctx, msg, data, reason).await,
        Command::Warns => warns(ctx, msg, data).await,
        Command::Kick { reason } => kick(ctx, msg, reason).await,
        Command::Ban { reason } => ban(ctx, msg, reason).await,
        Command::Joke => {
            msg.reply(&ctx.http, format!("😂 {}", data.jokes.random_joke()))
                .await?;
            Ok(())
        }
        Command::Help => {
            msg.reply(&ctx.http, help_text(&data.config.prefix)).await?;
            Ok(())
        }
        // Unrecognized tokens get no response at all.
        Command::Unknown => Ok(()),
    }
}

async fn warn(
    ctx: &serenity::Context,
    msg: &serenity::Message,
    data: &Data,
    reason: String,
) -> Result<(), Error> {
    let guild_id = msg.guild_id.ok_or("warn command outside a guild")?;

    if !author_has_permission(ctx, guild_id, msg.author.id, serenity::Permissions::KICK_MEMBERS)
        .await?
    {
        msg.reply(&ctx.http, "You don't have permission to warn.")
            .await?;
        return Ok(());
    }

    let Some(user) = msg.mentions.first() else {
        msg.reply(
            &ctx.http,
            format!("Mention a user: `{}warn @user reason`", data.config.prefix),
        )
        .await?;
        return Ok(());
    };

    let total = data.warns.warn(guild_id.get(), user.id.get()).await?;
    msg.channel_id
        .say(
            &ctx.http,
            format!(
                "{} has been warned. Reason: {}. Total warns: {}",
                user.mention(),
                reason,
                total
            ),
        )
        .await?;
    Ok(())
}

async fn warns(ctx: &serenity::Context, msg: &serenity::Message, data: &Data) -> Result<(), Error> {
    let guild_id = msg.guild_id.ok_or("warns command outside a guild")?;

    // No mention means the invoker asks about themselves. Pure query.
    let user = msg.mentions.first().unwrap_or(&msg.author);
    let count = data.warns.count(guild_id.get(), user.id.get()).await?;

    msg.reply(&ctx.http, format!("{} has {} warn(s).", user.tag(), count))
        .await?;
    Ok(())
}

async fn kick(ctx: &serenity::Context, msg: &serenity::Message, reason: String) -> Result<(), Error> {
    let guild_id = msg.guild_id.ok_or("kick command outside a guild")?;

    if !author_has_permission(ctx, guild_id, msg.author.id, serenity::Permissions::KICK_MEMBERS)
        .await?
    {
        msg.reply(&ctx.http, "You don't have permission to kick.")
            .await?;
        return Ok(());
    }

    let Some(user) = msg.mentions.first() else {
        msg.reply(&ctx.http, "Mention a member to kick.").await?;
        return Ok(());
    };

    if let Err(source) = guild_id.kick_with_reason(&ctx.http, user.id, &reason).await {
        // Echo the failure detail and skip the success message.
        msg.reply(&ctx.http, format!("Failed to kick: {}", source))
            .await?;
        return Ok(());
    }

    msg.channel_id
        .say(
            &ctx.http,
            format!("{} was kicked. Reason: {}", user.tag(), reason),
        )
        .await?;
    Ok(())
}

async fn ban(ctx: &serenity::Context, msg: &serenity::Message, reason: String) -> Result<(), Error> {
    let guild_id = msg.guild_id.ok_or("ban command outside a guild")?;

    if !author_has_permission(ctx, guild_id, msg.author.id, serenity::Permissions::BAN_MEMBERS)
        .await?
    {
        msg.reply(&ctx.http, "You don't have permission to ban.")
            .await?;
        return Ok(());
    }

    let Some(user) = msg.mentions.first() else {
        msg.reply(&ctx.http, "Mention a member to ban.").await?;
        return Ok(());
    };

    if let Err(source) = guild_id
        .ban_with_reason(&ctx.http, user.id, 0, &reason)
        .await
    {
        msg.reply(&ctx.http, format!("Failed to ban: {}", source))
            .await?;
        return Ok(());
    }

    msg.channel_id
        .say(
            &ctx.http,
            format!("{} was banned. Reason: {}", user.tag(), reason),
        )
        .await?;
    Ok(())
}

/// Resolve the author's effective guild permissions for a message command.
///
/// Serenity only resolves member permissions for interactions, so for plain
/// messages we union the author's role permissions (plus @everyone) over
/// HTTP. The guild owner implicitly has everything.
async fn author_has_permission(
    ctx: &serenity::Context,
    guild_id: serenity::GuildId,
    user_id: serenity::UserId,
    required: serenity::Permissions,
) -> Result<bool, Error> {
    let guild = guild_id.to_partial_guild(&ctx.http).await?;
    if guild.owner_id == user_id {
        return Ok(true);
    }

    let member = guild_id.member(&ctx.http, user_id).await?;
    let roles = guild_id.roles(&ctx.http).await?;
    let guild_roles: Vec<(serenity::RoleId, serenity::Permissions)> = roles
        .values()
        .map(|role| (role.id, role.permissions))
        .collect();

    let resolved = resolve_member_permissions(
        guild_id,
        guild.owner_id,
        user_id,
        &member.roles,
        &guild_roles,
    );
    Ok(permission_granted(resolved, required))
}

/// Pure half of the permission gate: owner gets everything, otherwise the
/// union of the @everyone role and the member's roles.
fn resolve_member_permissions(
    guild_id: serenity::GuildId,
    owner_id: serenity::UserId,
    user_id: serenity::UserId,
    member_role_ids: &[serenity::RoleId],
    guild_roles: &[(serenity::RoleId, serenity::Permissions)],
) -> serenity::Permissions {
    if owner_id == user_id {
        return serenity::Permissions::all();
    }

    // The @everyone role shares the guild's id.
    let everyone_role_id = serenity::RoleId::new(guild_id.get());

    let mut resolved = serenity::Permissions::empty();
    for (role_id, permissions) in guild_roles {
        if *role_id == everyone_role_id || member_role_ids.contains(role_id) {
            resolved |= *permissions;
        }
    }
    resolved
}

/// ADMINISTRATOR implicitly grants every permission.
fn permission_granted(resolved: serenity::Permissions, required: serenity::Permissions) -> bool {
    resolved.contains(serenity::Permissions::ADMINISTRATOR) || resolved.contains(required)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::warns::{WarnError, WarnService, WarnStore};
    use async_trait::async_trait;
    use dashmap::DashMap;

    const GUILD: u64 = 100;
    const OWNER: u64 = 1;
    const MEMBER: u64 = 2;

    fn gate(
        member_role_ids: &[serenity::RoleId],
        guild_roles: &[(serenity::RoleId, serenity::Permissions)],
        required: serenity::Permissions,
    ) -> bool {
        let resolved = resolve_member_permissions(
            serenity::GuildId::new(GUILD),
            serenity::UserId::new(OWNER),
            serenity::UserId::new(MEMBER),
            member_role_ids,
            guild_roles,
        );
        permission_granted(resolved, required)
    }

    #[test]
    fn test_member_without_kick_role_is_denied_warn_and_kick() {
        let chat_role = serenity::RoleId::new(555);
        let guild_roles = vec![(chat_role, serenity::Permissions::SEND_MESSAGES)];

        assert!(!gate(
            &[chat_role],
            &guild_roles,
            serenity::Permissions::KICK_MEMBERS
        ));
    }

    #[test]
    fn test_member_without_ban_role_is_denied_ban() {
        // Kick-level staff still may not ban.
        let staff_role = serenity::RoleId::new(556);
        let guild_roles = vec![(staff_role, serenity::Permissions::KICK_MEMBERS)];

        assert!(!gate(
            &[staff_role],
            &guild_roles,
            serenity::Permissions::BAN_MEMBERS
        ));
        assert!(gate(
            &[staff_role],
            &guild_roles,
            serenity::Permissions::KICK_MEMBERS
        ));
    }

    #[test]
    fn test_everyone_role_counts_without_membership() {
        // @everyone shares the guild id and applies to all members.
        let everyone = serenity::RoleId::new(GUILD);
        let guild_roles = vec![(everyone, serenity::Permissions::KICK_MEMBERS)];

        assert!(gate(&[], &guild_roles, serenity::Permissions::KICK_MEMBERS));
    }

    #[test]
    fn test_administrator_implies_all() {
        let admin_role = serenity::RoleId::new(557);
        let guild_roles = vec![(admin_role, serenity::Permissions::ADMINISTRATOR)];

        assert!(gate(&[admin_role], &guild_roles, serenity::Permissions::BAN_MEMBERS));
    }

    #[test]
    fn test_owner_bypasses_roles() {
        let resolved = resolve_member_permissions(
            serenity::GuildId::new(GUILD),
            serenity::UserId::new(OWNER),
            serenity::UserId::new(OWNER),
            &[],
            &[],
        );
        assert!(permission_granted(resolved, serenity::Permissions::BAN_MEMBERS));
    }

    /// In-memory store for testing
    struct MockWarnStore {
        warns: DashMap<(u64, u64), u32>,
    }

    #[async_trait]
    impl WarnStore for MockWarnStore {
        async fn get_warns(&self, guild_id: u64, user_id: u64) -> Result<u32, WarnError> {
            Ok(self
                .warns
                .get(&(guild_id, user_id))
                .map(|v| *v)
                .unwrap_or(0))
        }

        async fn add_warn(&self, guild_id: u64, user_id: u64) -> Result<u32, WarnError> {
            let mut count = self.warns.entry((guild_id, user_id)).or_insert(0);
            *count += 1;
            Ok(*count)
        }
    }

    #[tokio::test]
    async fn test_denied_warn_leaves_store_unchanged() {
        let service = WarnService::new(MockWarnStore {
            warns: DashMap::new(),
        });

        // Same short-circuit order as `warn`/`ban`: the gate runs first and a
        // denial returns before the store is ever touched.
        let chat_role = serenity::RoleId::new(555);
        let guild_roles = vec![(chat_role, serenity::Permissions::SEND_MESSAGES)];
        let granted = gate(&[chat_role], &guild_roles, serenity::Permissions::KICK_MEMBERS);
        assert!(!granted);
        if granted {
            service.warn(GUILD, 42).await.unwrap();
        }

        assert_eq!(service.count(GUILD, 42).await.unwrap(), 0);
    }
}
